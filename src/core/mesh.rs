use std::collections::BTreeSet;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{CandidateError, Result};

/// Axis-aligned bounding box around a primitive's swept volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Box spanned by a point moving linearly from `start` to `end`, grown by `radius`.
    pub fn from_swept_point(start: DVec3, end: DVec3, radius: f64) -> Self {
        Self {
            min: start.min(end) - DVec3::splat(radius),
            max: start.max(end) + DVec3::splat(radius),
        }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Closed-interval overlap test; touching boxes overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }
}

/// Extracts the unique undirected edges of a triangle table, each stored as
/// `[min, max]` and sorted.
pub fn edges_from_faces(faces: &[[usize; 3]]) -> Vec<[usize; 2]> {
    let mut unique = BTreeSet::new();
    for face in faces {
        for k in 0..3 {
            let a = face[k];
            let b = face[(k + 1) % 3];
            unique.insert([a.min(b), a.max(b)]);
        }
    }
    unique.into_iter().collect()
}

/// Checks that the two position snapshots agree in length, hold finite
/// coordinates, and that every edge and face row indexes into them.
pub fn validate_tables(
    vertices_t0: &[DVec3],
    vertices_t1: &[DVec3],
    edges: &[[usize; 2]],
    faces: &[[usize; 3]],
) -> Result<()> {
    let num_vertices = vertices_t0.len();
    if vertices_t1.len() != num_vertices {
        return Err(CandidateError::precondition(format!(
            "vertex snapshots differ in length ({} at t0, {} at t1)",
            num_vertices,
            vertices_t1.len()
        )));
    }
    if let Some(v) = vertices_t0
        .iter()
        .chain(vertices_t1)
        .position(|p| !p.is_finite())
    {
        return Err(CandidateError::precondition(format!(
            "vertex {} has a non-finite coordinate",
            v % num_vertices.max(1)
        )));
    }
    for (e, edge) in edges.iter().enumerate() {
        if let Some(&v) = edge.iter().find(|&&v| v >= num_vertices) {
            return Err(CandidateError::precondition(format!(
                "edge {e} references vertex {v} but only {num_vertices} vertices exist"
            )));
        }
    }
    for (f, face) in faces.iter().enumerate() {
        if let Some(&v) = face.iter().find(|&&v| v >= num_vertices) {
            return Err(CandidateError::precondition(format!(
                "face {f} references vertex {v} but only {num_vertices} vertices exist"
            )));
        }
    }
    Ok(())
}
