//! Sweep Candidates – broad-phase collision candidates for deforming meshes.
//!
//! The crate turns vertex, edge and face tables into typed candidate pairs
//! (edge–vertex, edge–edge, face–vertex, edge–face, vertex–vertex) by
//! querying a pluggable box overlap engine, and dispatches each candidate to
//! a continuous collision kernel that reports the earliest time of impact
//! over a linear step.
//!
//! Mesh tables are always borrowed for the duration of a call. Neither the
//! candidate container nor the broad-phase adapter keeps references to them,
//! so callers remain free to mutate their positions between steps.

pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod utils;

pub use glam::DVec3;

pub use collision::{
    broadphase::{BroadPhase, BuildKind},
    ccd::ContinuousCollisionCandidate,
    engines::{BruteForce, HashGrid, OverlapEngine, SweepAndPrune},
};
pub use config::{BroadPhaseConfig, BroadPhaseMethod, CcdParams};
pub use core::{
    candidates::{
        EdgeEdgeCandidate, EdgeFaceCandidate, EdgeVertexCandidate, FaceVertexCandidate,
        VertexVertexCandidate,
    },
    container::{CandidateRef, Candidates},
    mesh::{edges_from_faces, Aabb},
};
pub use error::{CandidateError, Result};
pub use pipeline::CcdPipeline;
