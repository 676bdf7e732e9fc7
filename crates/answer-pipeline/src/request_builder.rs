//! Solver request construction and profile selection.

use solver_core::{
    Origin, SolverProfile, SolverRequest, DEFAULT_BRIEF_INSTRUCTION, DEFAULT_DETAILED_INSTRUCTION,
};

/// System instructions for the two solver profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInstructions {
    pub brief: String,
    pub detailed: String,
}

impl Default for ProfileInstructions {
    fn default() -> Self {
        Self {
            brief: DEFAULT_BRIEF_INSTRUCTION.to_string(),
            detailed: DEFAULT_DETAILED_INSTRUCTION.to_string(),
        }
    }
}

impl ProfileInstructions {
    pub fn for_profile(&self, profile: SolverProfile) -> &str {
        match profile {
            SolverProfile::Brief => &self.brief,
            SolverProfile::Detailed => &self.detailed,
        }
    }
}

/// What to do with a piece of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPlan {
    /// Send this request to the solver.
    Solve(SolverRequest),
    /// Nothing to answer; ask the requester for input instead.
    PromptForInput,
}

/// Build the solver request for `content` from a given origin.
///
/// Attachments always get the detailed profile. Typed text gets the brief
/// profile, unless it is blank, in which case there is nothing to solve.
/// Content is trimmed and otherwise passed through untouched.
pub fn build_request(content: &str, origin: Origin, profiles: &ProfileInstructions) -> RequestPlan {
    let content = content.trim();
    let profile = match origin {
        Origin::FileAttachment => SolverProfile::Detailed,
        Origin::PlainText if content.is_empty() => return RequestPlan::PromptForInput,
        Origin::PlainText => SolverProfile::Brief,
    };

    RequestPlan::Solve(SolverRequest::new(
        profiles.for_profile(profile),
        content,
        profile,
    ))
}

/// Cut `content` to at most `max_chars` characters, appending a notice when
/// anything was dropped. Returns the text and whether it was cut.
pub fn fit_content(content: String, max_chars: usize) -> (String, bool) {
    let total = content.chars().count();
    if total <= max_chars {
        return (content, false);
    }

    let mut kept: String = content.chars().take(max_chars).collect();
    kept.push_str(&format!(
        "\n\n[Content truncated: only the first {} of {} characters were included.]",
        max_chars, total
    ));
    (kept, true)
}
