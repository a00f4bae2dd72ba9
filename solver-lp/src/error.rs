//! Error types for the LP solver.

use thiserror::Error;

/// Errors that can occur before the simplex method starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LpError {
    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),
}

/// Result type for LP operations.
pub type LpResult<T> = Result<T, LpError>;
