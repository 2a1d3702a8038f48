//! Continuous collision detection over linearly moving primitives.
//!
//! Every kernel runs conservative advancement on the distance between the two
//! primitives. With all points moving linearly, the distance can shrink no
//! faster than the sum of the largest centred displacement of each primitive,
//! so stepping by `distance / speed` never passes the first contact.

use glam::DVec3;
use log::warn;

use crate::{
    collision::distance::{
        edge_edge_distance_sq, point_edge_distance_sq, point_triangle_distance_sq,
    },
    config::CcdParams,
    core::{
        candidates::{EdgeEdgeCandidate, EdgeVertexCandidate, FaceVertexCandidate},
        container::CandidateRef,
    },
    error::{CandidateError, Result},
    utils::math::{centred, lerp_points, max_length},
};

/// Candidates that can be tested for a time of impact over `[0, tmax]`.
///
/// Mesh tables are borrowed for the duration of the call only. Returns
/// `Ok(Some(toi))` when the primitives collide, with `toi` already scaled by
/// `conservative_rescaling`, and `Ok(None)` when they do not.
pub trait ContinuousCollisionCandidate {
    fn ccd(
        &self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
        params: &CcdParams,
    ) -> Result<Option<f64>>;
}

impl ContinuousCollisionCandidate for EdgeVertexCandidate {
    fn ccd(
        &self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        _faces: &[[usize; 3]],
        params: &CcdParams,
    ) -> Result<Option<f64>> {
        params.validate()?;
        let [e0, e1] = table_row(edges, self.edge, "edge")?;
        let (start, end) = gather(vertices_t0, vertices_t1, [self.vertex, e0, e1])?;
        Ok(point_edge_ccd(start, end, params))
    }
}

impl ContinuousCollisionCandidate for EdgeEdgeCandidate {
    fn ccd(
        &self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        _faces: &[[usize; 3]],
        params: &CcdParams,
    ) -> Result<Option<f64>> {
        params.validate()?;
        let [a0, a1] = table_row(edges, self.edge0(), "edge")?;
        let [b0, b1] = table_row(edges, self.edge1(), "edge")?;
        let (start, end) = gather(vertices_t0, vertices_t1, [a0, a1, b0, b1])?;
        Ok(edge_edge_ccd(start, end, params))
    }
}

impl ContinuousCollisionCandidate for FaceVertexCandidate {
    fn ccd(
        &self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        _edges: &[[usize; 2]],
        faces: &[[usize; 3]],
        params: &CcdParams,
    ) -> Result<Option<f64>> {
        params.validate()?;
        let [f0, f1, f2] = table_row(faces, self.face, "face")?;
        let (start, end) = gather(vertices_t0, vertices_t1, [self.vertex, f0, f1, f2])?;
        Ok(point_triangle_ccd(start, end, params))
    }
}

impl ContinuousCollisionCandidate for CandidateRef<'_> {
    fn ccd(
        &self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
        params: &CcdParams,
    ) -> Result<Option<f64>> {
        match self {
            CandidateRef::EdgeVertex(c) => c.ccd(vertices_t0, vertices_t1, edges, faces, params),
            CandidateRef::EdgeEdge(c) => c.ccd(vertices_t0, vertices_t1, edges, faces, params),
            CandidateRef::FaceVertex(c) => c.ccd(vertices_t0, vertices_t1, edges, faces, params),
        }
    }
}

/// Point against segment. Both arrays are ordered `[point, edge0, edge1]`.
pub fn point_edge_ccd(start: [DVec3; 3], end: [DVec3; 3], params: &CcdParams) -> Option<f64> {
    conservative_advancement(start, end, 1, params, |x| {
        point_edge_distance_sq(x[0], x[1], x[2])
    })
}

/// Segment against segment. Both arrays are ordered `[a0, a1, b0, b1]`.
pub fn edge_edge_ccd(start: [DVec3; 4], end: [DVec3; 4], params: &CcdParams) -> Option<f64> {
    conservative_advancement(start, end, 2, params, |x| {
        edge_edge_distance_sq(x[0], x[1], x[2], x[3])
    })
}

/// Point against triangle. Both arrays are ordered `[point, t0, t1, t2]`.
pub fn point_triangle_ccd(start: [DVec3; 4], end: [DVec3; 4], params: &CcdParams) -> Option<f64> {
    conservative_advancement(start, end, 1, params, |x| {
        point_triangle_distance_sq(x[0], x[1], x[2], x[3])
    })
}

/// Shared root finder. Points `[..split]` belong to the first primitive and
/// `[split..]` to the second.
fn conservative_advancement<const N: usize>(
    start: [DVec3; N],
    end: [DVec3; N],
    split: usize,
    params: &CcdParams,
    distance_sq: impl Fn(&[DVec3; N]) -> f64,
) -> Option<f64> {
    let mut distance = distance_sq(&start).sqrt();
    if distance <= 0.0 {
        return Some(0.0);
    }

    let displacement: [DVec3; N] = centred(std::array::from_fn(|i| end[i] - start[i]));
    let speed = max_length(&displacement[..split]) + max_length(&displacement[split..]);
    if speed <= 0.0 {
        return None;
    }

    let threshold = params.tolerance * speed;
    let mut toi = 0.0;
    for _ in 0..params.max_iterations {
        if distance <= threshold {
            return Some(toi * params.conservative_rescaling);
        }
        toi += distance / speed;
        if toi > params.tmax {
            return None;
        }
        distance = distance_sq(&lerp_points(&start, &end, toi)).sqrt();
    }

    warn!(
        "ccd exhausted {} iterations at t = {toi:.6} (distance {distance:.3e}); reporting a conservative impact",
        params.max_iterations
    );
    Some(toi * params.conservative_rescaling)
}

fn table_row<const K: usize>(table: &[[usize; K]], index: usize, kind: &str) -> Result<[usize; K]> {
    table.get(index).copied().ok_or_else(|| {
        CandidateError::precondition(format!(
            "{kind} index {index} is out of range for a table of {} rows",
            table.len()
        ))
    })
}

fn gather<const N: usize>(
    vertices_t0: &[DVec3],
    vertices_t1: &[DVec3],
    ids: [usize; N],
) -> Result<([DVec3; N], [DVec3; N])> {
    if vertices_t0.len() != vertices_t1.len() {
        return Err(CandidateError::precondition(format!(
            "vertex snapshots differ in length ({} at t0, {} at t1)",
            vertices_t0.len(),
            vertices_t1.len()
        )));
    }
    if let Some(&v) = ids.iter().find(|&&v| v >= vertices_t0.len()) {
        return Err(CandidateError::precondition(format!(
            "vertex index {v} is out of range for {} vertices",
            vertices_t0.len()
        )));
    }
    let start = ids.map(|v| vertices_t0[v]);
    let end = ids.map(|v| vertices_t1[v]);
    if let Some(k) = (0..N).find(|&k| !(start[k].is_finite() && end[k].is_finite())) {
        return Err(CandidateError::precondition(format!(
            "vertex {} has a non-finite coordinate",
            ids[k]
        )));
    }
    Ok((start, end))
}
