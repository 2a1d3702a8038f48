//! Error types shared by the candidate model, the broad-phase adapter and the
//! CCD dispatcher.

use thiserror::Error;

/// Unified error type for candidate generation and dispatch.
#[derive(Debug, Error)]
pub enum CandidateError {
    /// A flat candidate index was past the end of the container.
    #[error("candidate index {index} is out of range for {len} candidates")]
    OutOfRange { index: usize, len: usize },

    /// Caller-supplied data or parameters violate the call contract.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// The overlap engine reported an unrecoverable error.
    #[error("broad-phase engine failure: {0}")]
    InternalFailure(String),

    /// The overlap engine produced an id outside the primitive index space.
    #[error("overlap id {id} is outside the primitive space of {count} boxes")]
    Corrupt { id: usize, count: usize },

    /// Writing a debug dump failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CandidateError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

/// Convenience alias for `Result<T, CandidateError>`.
pub type Result<T> = std::result::Result<T, CandidateError>;
