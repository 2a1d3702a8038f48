//! Aggregate container for the candidates of one detection pass.

use std::{io::Write, path::Path};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{
    collision::ccd::ContinuousCollisionCandidate,
    config::CcdParams,
    core::candidates::{
        EdgeEdgeCandidate, EdgeFaceCandidate, EdgeVertexCandidate, FaceVertexCandidate,
    },
    error::{CandidateError, Result},
    utils::obj,
};

/// Borrowed view of one CCD-bearing candidate, as returned by flat indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateRef<'a> {
    EdgeVertex(&'a EdgeVertexCandidate),
    EdgeEdge(&'a EdgeEdgeCandidate),
    FaceVertex(&'a FaceVertexCandidate),
}

/// Candidates produced by one broad-phase pass.
///
/// `ev`, `ee` and `fv` form the CCD set and share a flat index space in that
/// order. `ef` holds edge–face pairs for intersection checks and is not part
/// of the flat index space, [`len`](Self::len) or [`clear`](Self::clear).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidates {
    pub ev: Vec<EdgeVertexCandidate>,
    pub ee: Vec<EdgeEdgeCandidate>,
    pub fv: Vec<FaceVertexCandidate>,
    pub ef: Vec<EdgeFaceCandidate>,
}

impl Candidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of CCD candidates (`|ev| + |ee| + |fv|`).
    pub fn len(&self) -> usize {
        self.ev.len() + self.ee.len() + self.fv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ev.is_empty() && self.ee.is_empty() && self.fv.is_empty()
    }

    /// Empties the CCD set. Edge–face candidates are kept.
    pub fn clear(&mut self) {
        self.ev.clear();
        self.ee.clear();
        self.fv.clear();
    }

    /// Empties every sequence, edge–face candidates included.
    pub fn clear_all(&mut self) {
        self.clear();
        self.ef.clear();
    }

    /// Candidate at `index` in the EV ‖ EE ‖ FV concatenation.
    pub fn get(&self, index: usize) -> Result<CandidateRef<'_>> {
        let mut local = index;
        if let Some(ev) = self.ev.get(local) {
            return Ok(CandidateRef::EdgeVertex(ev));
        }
        local -= self.ev.len();
        if let Some(ee) = self.ee.get(local) {
            return Ok(CandidateRef::EdgeEdge(ee));
        }
        local -= self.ee.len();
        if let Some(fv) = self.fv.get(local) {
            return Ok(CandidateRef::FaceVertex(fv));
        }
        Err(CandidateError::OutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Walks the flat index space in order.
    pub fn iter(&self) -> impl Iterator<Item = CandidateRef<'_>> + '_ {
        self.ev
            .iter()
            .map(CandidateRef::EdgeVertex)
            .chain(self.ee.iter().map(CandidateRef::EdgeEdge))
            .chain(self.fv.iter().map(CandidateRef::FaceVertex))
    }

    /// Sorts every sequence and removes duplicates, giving a canonical form
    /// that compares equal for equal candidate sets.
    pub fn sort_unstable(&mut self) {
        fn canonical<T: Ord>(items: &mut Vec<T>) {
            items.sort_unstable();
            items.dedup();
        }
        canonical(&mut self.ev);
        canonical(&mut self.ee);
        canonical(&mut self.fv);
        canonical(&mut self.ef);
    }

    /// Runs CCD on every candidate and returns the smallest time of impact,
    /// or `None` when the whole motion is collision free.
    ///
    /// Any failing candidate fails the whole sweep.
    pub fn earliest_toi(
        &self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
        params: &CcdParams,
    ) -> Result<Option<f64>> {
        params.validate()?;
        let toi_at = |index: usize| -> Result<Option<f64>> {
            self.get(index)?
                .ccd(vertices_t0, vertices_t1, edges, faces, params)
        };

        #[cfg(feature = "parallel")]
        let tois: Vec<Option<f64>> = {
            use rayon::prelude::*;
            (0..self.len())
                .into_par_iter()
                .map(toi_at)
                .collect::<Result<_>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let tois: Vec<Option<f64>> = (0..self.len()).map(toi_at).collect::<Result<_>>()?;

        Ok(tois.into_iter().flatten().reduce(f64::min))
    }

    /// Writes the candidates as a labelled wavefront OBJ file.
    pub fn save_obj(
        &self,
        path: impl AsRef<Path>,
        vertices: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
    ) -> Result<()> {
        obj::save_obj(path.as_ref(), self, vertices, edges, faces)
    }

    /// Same as [`save_obj`](Self::save_obj) into any writer.
    pub fn write_obj<W: Write>(
        &self,
        writer: W,
        vertices: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
    ) -> Result<()> {
        obj::write_obj(writer, self, vertices, edges, faces)
    }
}
