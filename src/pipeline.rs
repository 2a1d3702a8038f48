//! One-call continuous collision check for a simulation step.

use glam::DVec3;
use log::debug;

use crate::{
    collision::broadphase::BroadPhase,
    config::{validate_inflation_radius, BroadPhaseConfig, CcdParams},
    core::container::Candidates,
    error::{CandidateError, Result},
};

/// Builds continuous boxes, detects candidates and sweeps them with CCD.
///
/// The pipeline keeps its candidate buffer between steps so repeated calls
/// reuse the allocations.
pub struct CcdPipeline {
    broad_phase: BroadPhase,
    params: CcdParams,
    dim: usize,
    inflation_radius: f64,
    candidates: Candidates,
}

impl CcdPipeline {
    pub fn new(dim: usize, config: &BroadPhaseConfig, params: CcdParams) -> Result<Self> {
        if dim != 2 && dim != 3 {
            return Err(CandidateError::precondition(format!(
                "simulation dimension must be 2 or 3, got {dim}"
            )));
        }
        params.validate()?;
        Ok(Self {
            broad_phase: BroadPhase::from_config(config)?,
            params,
            dim,
            inflation_radius: config.inflation_radius,
            candidates: Candidates::new(),
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn params(&self) -> &CcdParams {
        &self.params
    }

    pub fn set_params(&mut self, params: CcdParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn set_inflation_radius(&mut self, inflation_radius: f64) -> Result<()> {
        validate_inflation_radius(inflation_radius)?;
        self.inflation_radius = inflation_radius;
        Ok(())
    }

    pub fn broad_phase(&self) -> &BroadPhase {
        &self.broad_phase
    }

    /// Candidates found by the last step. Empty after a failed step.
    pub fn candidates(&self) -> &Candidates {
        &self.candidates
    }

    /// Earliest time of impact over the step from `vertices_t0` to
    /// `vertices_t1`, or `None` when nothing collides.
    pub fn earliest_impact(
        &mut self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
    ) -> Result<Option<f64>> {
        let result = self.sweep(vertices_t0, vertices_t1, edges, faces);
        if result.is_err() {
            self.candidates.clear_all();
        }
        result
    }

    fn sweep(
        &mut self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
    ) -> Result<Option<f64>> {
        self.broad_phase.build_continuous(
            vertices_t0,
            vertices_t1,
            edges,
            faces,
            self.inflation_radius,
        )?;
        self.broad_phase
            .detect_collision_candidates(self.dim, &mut self.candidates)?;

        let toi = self.candidates.earliest_toi(
            vertices_t0,
            vertices_t1,
            edges,
            faces,
            &self.params,
        )?;
        match toi {
            Some(t) => debug!("ccd over {} candidates: impact at t = {t:.6}", self.candidates.len()),
            None => debug!("ccd over {} candidates: collision free", self.candidates.len()),
        }
        Ok(toi)
    }

    /// Largest fraction of the step that is free of collisions: the earliest
    /// time of impact, or `1.0` when nothing collides.
    pub fn collision_free_step(
        &mut self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
    ) -> Result<f64> {
        Ok(self
            .earliest_impact(vertices_t0, vertices_t1, edges, faces)?
            .unwrap_or(1.0))
    }

    pub fn is_step_collision_free(
        &mut self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
    ) -> Result<bool> {
        Ok(self
            .earliest_impact(vertices_t0, vertices_t1, edges, faces)?
            .is_none())
    }
}
