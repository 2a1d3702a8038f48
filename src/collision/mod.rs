//! Collision modules: broad-phase adapter, overlap engines, CCD kernels and distances.

pub mod broadphase;
pub mod ccd;
pub mod distance;
pub mod engines;
pub mod layout;

pub use broadphase::{BroadPhase, BuildKind};
pub use ccd::{edge_edge_ccd, point_edge_ccd, point_triangle_ccd, ContinuousCollisionCandidate};
pub use engines::{BruteForce, HashGrid, OverlapEngine, SweepAndPrune};
pub use layout::{Primitive, PrimitiveLayout};
