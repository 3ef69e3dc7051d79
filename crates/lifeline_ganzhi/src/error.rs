//! Error types for calendrical computations.

use lifeline_time::TimeError;
use thiserror::Error;

/// Errors from pillar or decade-cycle computation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// Invalid civil date or time.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// Iterative solar-term search did not converge.
    #[error("no convergence: {0}")]
    NoConvergence(&'static str),
    /// The adapter cannot serve the requested instant.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}
