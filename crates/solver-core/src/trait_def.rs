//! The Solver trait definition.

use async_trait::async_trait;

use crate::error::SolverError;
use crate::request::{SolverAnswer, SolverRequest};

/// A trait for turning a composed request into answer text.
///
/// One request, one response. Implementations make no promise of
/// deterministic output. This trait is object-safe and can be used with
/// `Box<dyn Solver>`.
#[async_trait]
pub trait Solver: Send + Sync {
    /// Solve a request.
    async fn solve(&self, request: SolverRequest) -> Result<SolverAnswer, SolverError>;

    /// Get a human-readable name for this solver implementation.
    fn name(&self) -> &str;

    /// Check if the solver is ready to accept requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}

#[async_trait]
impl<S: Solver + ?Sized> Solver for std::sync::Arc<S> {
    async fn solve(&self, request: SolverRequest) -> Result<SolverAnswer, SolverError> {
        (**self).solve(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_ready(&self) -> bool {
        (**self).is_ready().await
    }
}
