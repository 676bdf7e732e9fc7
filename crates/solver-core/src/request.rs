//! Solver request and answer types.

use serde::{Deserialize, Serialize};

/// Verbosity and capability tier applied to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverProfile {
    /// Concise instruction, lower-tier model. Used for typed questions.
    Brief,
    /// Step-structured instruction, higher-tier model. Used for files.
    Detailed,
}

impl SolverProfile {
    /// Stable name for logs and config keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Detailed => "detailed",
        }
    }
}

impl std::fmt::Display for SolverProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role-tagged prompt ready for the solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverRequest {
    /// System instruction, fixed per profile.
    pub system_instruction: String,
    /// Extracted document text or the typed question.
    pub user_content: String,
    /// Which profile was selected.
    pub profile: SolverProfile,
}

impl SolverRequest {
    /// Create a new request.
    pub fn new(
        system_instruction: impl Into<String>,
        user_content: impl Into<String>,
        profile: SolverProfile,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_content: user_content.into(),
            profile,
        }
    }
}

/// Free-form answer text returned by a solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverAnswer {
    /// The answer text.
    pub text: String,
    /// Model that produced the answer, when known.
    pub model: Option<String>,
}

impl SolverAnswer {
    /// Create an answer with no model information.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }

    /// Attach the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Length in characters, which drives pagination decisions downstream.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
