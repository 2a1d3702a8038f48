//! Core types: candidate pairs, the candidate container and mesh tables.

pub mod candidates;
pub mod container;
pub mod mesh;

pub use candidates::{
    EdgeEdgeCandidate, EdgeFaceCandidate, EdgeVertexCandidate, FaceVertexCandidate,
    VertexVertexCandidate,
};
pub use container::{CandidateRef, Candidates};
pub use mesh::{edges_from_faces, validate_tables, Aabb};
