//! Mock solver implementations for exercising the answer pipeline.
//!
//! This crate provides mock implementations of the `Solver` trait for testing:
//! - `FixedSolver` - Returns the same canned answer every time
//! - `EchoSolver` - Echoes the user content back, optionally prefixed
//! - `FailingSolver` - Always fails with a chosen error
//! - `DelayedSolver` - Wraps another solver with artificial delay
//! - `RecordingSolver` - Wraps another solver and records every request
//!
//! For real answers, use the `openai-solver` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_solver::{FixedSolver, Solver, SolverProfile, SolverRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_solver::SolverError> {
//!     let solver = FixedSolver::new("A1: 4");
//!     let request = SolverRequest::new("system", "Q1: 2+2", SolverProfile::Brief);
//!
//!     let answer = solver.solve(request).await?;
//!     assert_eq!(answer.text, "A1: 4");
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod failing;
mod fixed;
mod recording;

// Re-export solver-core types for convenience
pub use solver_core::{async_trait, Solver, SolverAnswer, SolverError, SolverProfile, SolverRequest};

pub use delayed::DelayedSolver;
pub use echo::EchoSolver;
pub use failing::{FailureKind, FailingSolver};
pub use fixed::FixedSolver;
pub use recording::RecordingSolver;
