//! Overlap engines queried by the broad-phase adapter.
//!
//! An engine only sees a flat list of boxes and answers with index pairs of
//! overlapping boxes. It knows nothing about vertices, edges or faces; the
//! adapter decodes the pairs afterwards.

pub mod brute_force;
pub mod hash_grid;
pub mod sweep_prune;

pub use brute_force::BruteForce;
pub use hash_grid::HashGrid;
pub use sweep_prune::SweepAndPrune;

use crate::{
    config::{BroadPhaseConfig, BroadPhaseMethod},
    core::mesh::Aabb,
    error::Result,
};

/// Trait implemented by box–box overlap backends.
pub trait OverlapEngine: Send + Sync {
    fn name(&self) -> &str;

    /// Returns every pair `[i, j]` of indices into `boxes` whose boxes overlap.
    ///
    /// Pairs may come in any order and orientation, and may repeat; the
    /// adapter normalizes them. Unrecoverable failures are reported as
    /// [`CandidateError::InternalFailure`](crate::error::CandidateError::InternalFailure).
    fn find_overlaps(&self, boxes: &[Aabb]) -> Result<Vec<[usize; 2]>>;
}

impl BroadPhaseMethod {
    pub fn create_engine(self, config: &BroadPhaseConfig) -> Box<dyn OverlapEngine> {
        match self {
            BroadPhaseMethod::BruteForce => Box::new(BruteForce::new()),
            BroadPhaseMethod::SweepAndPrune => Box::new(SweepAndPrune::new()),
            BroadPhaseMethod::HashGrid => Box::new(HashGrid::new(config.grid_cell_size)),
        }
    }
}
