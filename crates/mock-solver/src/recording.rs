//! Recording solver - captures every request it forwards.

use solver_core::{async_trait, Solver, SolverAnswer, SolverError, SolverRequest};
use tokio::sync::Mutex;

/// Wraps a solver and keeps a copy of each request, in order.
pub struct RecordingSolver<S: Solver> {
    inner: S,
    requests: Mutex<Vec<SolverRequest>>,
}

impl<S: Solver> RecordingSolver<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all requests seen so far.
    pub async fn requests(&self) -> Vec<SolverRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of requests seen so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl<S: Solver> Solver for RecordingSolver<S> {
    async fn solve(&self, request: SolverRequest) -> Result<SolverAnswer, SolverError> {
        self.requests.lock().await.push(request.clone());
        self.inner.solve(request).await
    }

    fn name(&self) -> &str {
        "RecordingSolver"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
