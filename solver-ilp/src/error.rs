//! Error types for the ILP solver.
//!
//! Relaxation outcomes (infeasible, unbounded, iteration limit) are not
//! errors; they travel through the search as [`crate::SearchOutcome`] values.

use solver_lp::LpError;
use thiserror::Error;

/// Errors that can occur during an ILP solve.
#[derive(Error, Debug)]
pub enum IlpError {
    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Settings out of range
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Relaxation oracle returned malformed data
    #[error("Oracle failed: {0}")]
    OracleError(String),

    /// Internal solver error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// LP solver rejected the relaxation
    #[error("LP solver error: {0}")]
    Lp(#[from] LpError),
}

/// Result type for ILP operations.
pub type IlpResult<T> = Result<T, IlpError>;
