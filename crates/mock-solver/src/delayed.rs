//! Delayed solver implementation - wraps another solver with artificial delay.

use std::time::Duration;

use solver_core::{async_trait, Solver, SolverAnswer, SolverError, SolverRequest};
use tokio::time::sleep;

/// A solver that wraps another solver and adds artificial delay.
///
/// Useful for simulating inference latency.
pub struct DelayedSolver<S: Solver> {
    inner: S,
    delay: Duration,
}

impl<S: Solver> DelayedSolver<S> {
    /// Create a new DelayedSolver wrapping the given solver with the specified delay.
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a solver with a delay in milliseconds.
    pub fn with_millis(inner: S, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<S: Solver> Solver for DelayedSolver<S> {
    async fn solve(&self, request: SolverRequest) -> Result<SolverAnswer, SolverError> {
        sleep(self.delay).await;
        self.inner.solve(request).await
    }

    fn name(&self) -> &str {
        "DelayedSolver"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
