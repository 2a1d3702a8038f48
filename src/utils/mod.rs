//! Utility helpers: vector math, build profiling, OBJ output.

pub mod math;
pub mod obj;
pub mod profiling;

pub use math::*;
pub use profiling::{DetectionProfile, Stage};
