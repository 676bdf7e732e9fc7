//! Core trait and types for solver implementations.
//!
//! This crate provides the shared interface between the answer pipeline and
//! whatever produces the answers. It defines:
//!
//! - [`Solver`] - The trait every solver client implements
//! - [`InboundRequest`] / [`Attachment`] - What arrives from the transport
//! - [`SolverRequest`] / [`SolverAnswer`] - What goes to and comes back from the solver
//! - [`SolverError`] - Error types for solver operations
//!
//! # Example
//!
//! ```rust
//! use solver_core::{Solver, SolverAnswer, SolverError, SolverRequest};
//! use async_trait::async_trait;
//!
//! struct MySolver;
//!
//! #[async_trait]
//! impl Solver for MySolver {
//!     async fn solve(&self, request: SolverRequest) -> Result<SolverAnswer, SolverError> {
//!         Ok(SolverAnswer::new(format!("You asked: {}", request.user_content)))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MySolver"
//!     }
//! }
//! ```

mod error;
mod inbound;
mod prompt;
mod request;
mod trait_def;

pub use error::SolverError;
pub use inbound::{Attachment, InboundRequest, Origin};
pub use prompt::{hash_prompt, DEFAULT_BRIEF_INSTRUCTION, DEFAULT_DETAILED_INSTRUCTION};
pub use request::{SolverAnswer, SolverProfile, SolverRequest};
pub use trait_def::Solver;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
