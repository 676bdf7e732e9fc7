//! OpenAI-compatible solver implementation.
//!
//! This crate provides a [`Solver`] that sends each request to a
//! chat-completions endpoint as a two-message conversation (system
//! instruction, user content) and returns the first choice.
//!
//! # Features
//!
//! - One model per solver profile (brief vs. detailed tier)
//! - Per-profile token limits
//! - Network and 5xx/429 failures map to `SolverError::Unavailable`;
//!   other API refusals map to `SolverError::Rejected`
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_solver::OpenAiSolver;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let solver = OpenAiSolver::from_env()?;
//! // Hand the solver to the answer pipeline...
//! # Ok(())
//! # }
//! ```

mod api_types;
mod config;
mod solver;

pub use config::{OpenAiSolverConfig, OpenAiSolverConfigBuilder};
pub use solver::OpenAiSolver;

// Re-export solver-core types for convenience
pub use solver_core::{async_trait, Solver, SolverAnswer, SolverError, SolverProfile, SolverRequest};
