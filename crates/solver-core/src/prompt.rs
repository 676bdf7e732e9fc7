//! Profile instructions and prompt fingerprinting.

use sha2::{Digest, Sha256};

/// Built-in instruction for the brief profile (typed questions).
pub const DEFAULT_BRIEF_INSTRUCTION: &str = "You are a helpful tutor. Answer the question \
concisely and correctly. Give the final answer first, then at most a short explanation.";

/// Built-in instruction for the detailed profile (uploaded worksheets).
pub const DEFAULT_DETAILED_INSTRUCTION: &str = "You are a meticulous tutor solving a worksheet. \
The text below was extracted from a document and may contain extraction noise. \
Identify every question in order. For each one, restate it briefly, work through \
the solution step by step, and finish with a clearly labelled final answer. \
Number your answers to match the questions. Use plain text, no markdown tables.";

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_prompt_stable() {
        let first = hash_prompt("test prompt");
        let second = hash_prompt("test prompt");
        let different = hash_prompt("another prompt");

        assert_eq!(first, second);
        assert_ne!(first, different);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_default_instructions_differ() {
        assert_ne!(
            hash_prompt(DEFAULT_BRIEF_INSTRUCTION),
            hash_prompt(DEFAULT_DETAILED_INSTRUCTION)
        );
    }
}
