//! Attachment classification and text extraction.
//!
//! Two strategies, chosen once per attachment by [`classify`]:
//!
//! - **Structural**: read the embedded text layer of a PDF, page by page.
//! - **Optical**: run OCR over a single image buffer.
//!
//! [`TextExtractor`] runs either strategy and enforces the minimum-length
//! gate, so a scanned PDF with no text layer is reported as a failure rather
//! than handed to the solver as an empty prompt.
//!
//! ```rust,no_run
//! use extraction::{classify, TesseractCli, TextExtractor};
//! use solver_core::Attachment;
//! use std::sync::Arc;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let attachment = Attachment::new("application/pdf", "https://files/1");
//! let strategy = classify(&attachment)?;
//!
//! let extractor = TextExtractor::new(Arc::new(TesseractCli::default()));
//! let document = extractor.extract(strategy, &bytes).await?;
//! println!("{} pages, {} chars", document.page_count.unwrap_or(0), document.text.len());
//! # Ok(())
//! # }
//! ```

mod classify;
mod command;
mod error;
mod extractor;
mod ocr;
mod pdf;
mod render;
mod sanitize;
mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod fixtures;

pub use classify::{classify, ClassifyError, ExtractionStrategy};
pub use error::ExtractionError;
pub use extractor::{ExtractorConfig, ScannedPdfPolicy, TextExtractor};
pub use ocr::{OcrEngine, TesseractCli};
pub use pdf::{PageTextReader, PdfExtractReader};
pub use render::{PageRenderer, PdftoppmRenderer};
pub use sanitize::{normalize_ocr_text, normalize_page_text};
pub use types::{ExtractedDocument, SourceKind, PAGE_SEPARATOR};
