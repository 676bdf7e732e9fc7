//! Output assembly for solver answers.
//!
//! Two output shapes, picked by what the destination can accept:
//!
//! - [`ChunkedText`]: the answer split into slices no longer than a message
//!   size limit. Concatenating the chunks gives back the answer exactly.
//! - [`PaginatedDocument`]: the answer laid out on fixed-size pages, rendered
//!   to PDF bytes with [`render_pdf`].
//!
//! ```rust
//! use assembler::{chunk, paginate, LayoutMetrics};
//!
//! let chunks = chunk("A1: 4\nA2: Paris", 2800);
//! assert_eq!(chunks, vec!["A1: 4\nA2: Paris".to_string()]);
//!
//! let doc = paginate("Solved worksheet.pdf", "A1: 4\nA2: Paris", &LayoutMetrics::default());
//! assert_eq!(doc.pages.len(), 1);
//! assert_eq!(doc.line_count(), 2);
//! ```

mod chunk;
mod error;
mod layout;
mod paginate;
mod pdf;

pub use chunk::{chunk, ChunkedText};
pub use error::AssemblyError;
pub use layout::LayoutMetrics;
pub use paginate::{compose_body, paginate, wrap_line, Page, PaginatedDocument};
pub use pdf::render_pdf;

/// An assembled answer, ready for exactly one delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputArtifact {
    /// Ordered message-sized slices.
    Chunked(ChunkedText),
    /// Laid-out pages, to be rendered and sent as a file.
    Document(PaginatedDocument),
}

impl OutputArtifact {
    /// Split `text` into message-sized chunks.
    pub fn chunked(text: &str, limit: usize) -> Self {
        Self::Chunked(ChunkedText::new(text, limit))
    }

    /// Lay `body` out on pages under `title`.
    pub fn document(title: &str, body: &str, metrics: &LayoutMetrics) -> Self {
        Self::Document(paginate(title, body, metrics))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Chunked(_) => "chunked_text",
            Self::Document(_) => "paginated_document",
        }
    }
}
