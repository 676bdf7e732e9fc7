//! Extraction result types.

use serde::{Deserialize, Serialize};

/// Soft separator placed between pages in structural extraction output.
pub const PAGE_SEPARATOR: &str = "\n\n--- Page Break ---\n\n";

/// Which strategy produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Embedded text layer.
    Structural,
    /// Image recognition.
    Optical,
}

/// Normalized text pulled out of one attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Trimmed text, pages separated by [`PAGE_SEPARATOR`].
    pub text: String,
    /// Number of pages in the source. Optical extraction of an image counts as one.
    pub page_count: Option<usize>,
    /// Which strategy produced `text`.
    pub source_kind: SourceKind,
}

impl ExtractedDocument {
    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Text of each page, in order.
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.text.split(PAGE_SEPARATOR)
    }

    /// Characters of page content, not counting page separators.
    pub fn content_len(&self) -> usize {
        self.pages().map(|p| p.trim().chars().count()).sum()
    }
}
