//! Error types for text extraction.

use thiserror::Error;

/// Errors that can occur while extracting text from an attachment payload.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The payload is not a readable document.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The document parsed but has no pages.
    #[error("document has no pages")]
    EmptyDocument,

    /// The OCR engine could not process the buffer.
    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    /// Rendering PDF pages to images failed.
    #[error("page rendering failed: {0}")]
    RenderFailed(String),

    /// Extraction produced too little text to be a real question.
    #[error("extracted text too short ({length} chars, minimum {minimum})")]
    BelowMinimumLength { length: usize, minimum: usize },
}

impl ExtractionError {
    /// Stable machine-readable reason for logs and user messages.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed_document",
            Self::EmptyDocument => "empty_document",
            Self::OcrUnavailable(_) => "ocr_unavailable",
            Self::RenderFailed(_) => "render_failed",
            Self::BelowMinimumLength { .. } => "text_below_minimum",
        }
    }
}
