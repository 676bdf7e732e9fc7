//! Fixed solver implementation - always returns the same answer.

use std::sync::atomic::{AtomicUsize, Ordering};

use solver_core::{async_trait, Solver, SolverAnswer, SolverError, SolverRequest};

/// A solver that returns a canned answer and counts how often it was asked.
#[derive(Debug, Default)]
pub struct FixedSolver {
    answer: String,
    calls: AtomicUsize,
}

impl FixedSolver {
    /// Create a solver that always answers with `answer`.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `solve` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Solver for FixedSolver {
    async fn solve(&self, _request: SolverRequest) -> Result<SolverAnswer, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SolverAnswer::new(self.answer.clone()).with_model("fixed"))
    }

    fn name(&self) -> &str {
        "FixedSolver"
    }
}
