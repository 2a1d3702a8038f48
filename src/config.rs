//! Configuration defaults and parameter sets for candidate detection and CCD.

use serde::{Deserialize, Serialize};

use crate::error::{CandidateError, Result};

/// Largest time of impact of interest by default (the whole step).
pub const DEFAULT_CCD_TMAX: f64 = 1.0;

/// Default root-finding accuracy in time.
pub const DEFAULT_CCD_TOLERANCE: f64 = 1e-6;

/// Default bound on conservative-advancement iterations per candidate.
pub const DEFAULT_CCD_MAX_ITERATIONS: u64 = 10_000_000;

/// Default factor applied to a found time of impact.
pub const DEFAULT_CONSERVATIVE_RESCALING: f64 = 0.8;

/// Default enlargement of every primitive box.
pub const DEFAULT_INFLATION_RADIUS: f64 = 0.0;

/// Squared lengths below this are treated as degenerate by the distance kernels.
pub const DEGENERATE_LENGTH_SQ: f64 = 1e-30;

/// Scalar arguments of the CCD predicate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CcdParams {
    /// Only impacts with a time of impact in `[0, tmax]` are reported.
    pub tmax: f64,
    /// Accuracy of the reported time of impact.
    pub tolerance: f64,
    /// Bound on the number of advancement steps.
    pub max_iterations: u64,
    /// Shrinks the reported time of impact toward zero, in `(0, 1]`.
    pub conservative_rescaling: f64,
}

impl Default for CcdParams {
    fn default() -> Self {
        Self {
            tmax: DEFAULT_CCD_TMAX,
            tolerance: DEFAULT_CCD_TOLERANCE,
            max_iterations: DEFAULT_CCD_MAX_ITERATIONS,
            conservative_rescaling: DEFAULT_CONSERVATIVE_RESCALING,
        }
    }
}

impl CcdParams {
    pub fn new(tmax: f64, tolerance: f64, max_iterations: u64, conservative_rescaling: f64) -> Self {
        Self {
            tmax,
            tolerance,
            max_iterations,
            conservative_rescaling,
        }
    }

    pub fn with_tmax(mut self, tmax: f64) -> Self {
        self.tmax = tmax;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_conservative_rescaling(mut self, conservative_rescaling: f64) -> Self {
        self.conservative_rescaling = conservative_rescaling;
        self
    }

    /// Checks every field against its admissible range.
    pub fn validate(&self) -> Result<()> {
        if !(self.tmax > 0.0 && self.tmax <= 1.0) {
            return Err(CandidateError::precondition(format!(
                "tmax must lie in (0, 1], got {}",
                self.tmax
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(CandidateError::precondition(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations < 1 {
            return Err(CandidateError::precondition(
                "max_iterations must be at least 1",
            ));
        }
        if !(self.conservative_rescaling > 0.0 && self.conservative_rescaling <= 1.0) {
            return Err(CandidateError::precondition(format!(
                "conservative_rescaling must lie in (0, 1], got {}",
                self.conservative_rescaling
            )));
        }
        Ok(())
    }
}

/// Overlap engine used by the broad-phase adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadPhaseMethod {
    BruteForce,
    #[default]
    SweepAndPrune,
    HashGrid,
}

/// Broad-phase settings, typically loaded alongside the simulation scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadPhaseConfig {
    pub method: BroadPhaseMethod,
    /// Isotropic enlargement of every primitive box.
    pub inflation_radius: f64,
    /// Cell size for [`BroadPhaseMethod::HashGrid`]; derived from the boxes when unset.
    pub grid_cell_size: Option<f64>,
}

impl Default for BroadPhaseConfig {
    fn default() -> Self {
        Self {
            method: BroadPhaseMethod::default(),
            inflation_radius: DEFAULT_INFLATION_RADIUS,
            grid_cell_size: None,
        }
    }
}

impl BroadPhaseConfig {
    pub fn validate(&self) -> Result<()> {
        validate_inflation_radius(self.inflation_radius)?;
        if let Some(cell_size) = self.grid_cell_size {
            if !(cell_size > 0.0 && cell_size.is_finite()) {
                return Err(CandidateError::precondition(format!(
                    "grid_cell_size must be positive, got {cell_size}"
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_inflation_radius(inflation_radius: f64) -> Result<()> {
    if !(inflation_radius >= 0.0 && inflation_radius.is_finite()) {
        return Err(CandidateError::precondition(format!(
            "inflation radius must be finite and non-negative, got {inflation_radius}"
        )));
    }
    Ok(())
}
