//! Failing solver implementation - always errors.

use solver_core::{async_trait, Solver, SolverAnswer, SolverError, SolverRequest};

/// Which error a [`FailingSolver`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// `SolverError::Unavailable`
    Unavailable,
    /// `SolverError::Rejected`
    Rejected,
}

/// A solver that fails every request.
#[derive(Debug, Clone)]
pub struct FailingSolver {
    kind: FailureKind,
    reason: String,
}

impl FailingSolver {
    /// A solver that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            kind: FailureKind::Unavailable,
            reason: "connection refused".to_string(),
        }
    }

    /// A solver that rejects every request with `reason`.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Rejected,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Solver for FailingSolver {
    async fn solve(&self, _request: SolverRequest) -> Result<SolverAnswer, SolverError> {
        Err(match self.kind {
            FailureKind::Unavailable => SolverError::Unavailable(self.reason.clone()),
            FailureKind::Rejected => SolverError::Rejected(self.reason.clone()),
        })
    }

    fn name(&self) -> &str {
        "FailingSolver"
    }

    async fn is_ready(&self) -> bool {
        self.kind != FailureKind::Unavailable
    }
}
