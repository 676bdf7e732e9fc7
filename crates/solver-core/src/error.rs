//! Error types for solver operations.

use thiserror::Error;

/// Errors that can occur while asking a solver for an answer.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The solver could not be reached or is temporarily overloaded.
    #[error("solver unavailable: {0}")]
    Unavailable(String),

    /// The solver refused the request or returned nothing usable.
    #[error("solver rejected request: {0}")]
    Rejected(String),

    /// The solver is misconfigured (missing key, bad URL).
    #[error("configuration error: {0}")]
    Configuration(String),
}
