//! Echo solver implementation - echoes the user content back.

use solver_core::{async_trait, Solver, SolverAnswer, SolverError, SolverRequest};

/// A simple solver that echoes the user content back.
///
/// Useful for testing the message flow without any model call.
#[derive(Debug, Clone, Default)]
pub struct EchoSolver {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoSolver {
    /// Create a new EchoSolver with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoSolver with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_solver::EchoSolver;
    ///
    /// let solver = EchoSolver::with_prefix("Echo: ");
    /// // Will answer with "Echo: <user content>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl Solver for EchoSolver {
    async fn solve(&self, request: SolverRequest) -> Result<SolverAnswer, SolverError> {
        let text = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, request.user_content),
            None => request.user_content,
        };
        Ok(SolverAnswer::new(text))
    }

    fn name(&self) -> &str {
        "EchoSolver"
    }
}
