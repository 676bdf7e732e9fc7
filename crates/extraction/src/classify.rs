//! Attachment classification.
//!
//! Classification looks only at declared metadata, never at payload bytes.

use solver_core::Attachment;
use thiserror::Error;
use tracing::debug;

/// How text should be pulled out of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Read the embedded text layer of a paginated document.
    Structural,
    /// Recognize text from a raster image.
    Optical,
}

/// Attachment metadata matched no extraction strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported attachment kind: {content_type} ({})", declared_kind.as_deref().unwrap_or("no declared kind"))]
pub struct ClassifyError {
    /// Declared content type.
    pub content_type: String,
    /// Declared file kind, if any.
    pub declared_kind: Option<String>,
}

const PDF_MIME: &str = "application/pdf";
const GENERIC_MIMES: [&str; 3] = ["", "application/octet-stream", "binary/octet-stream"];

/// Pick an extraction strategy for an attachment.
///
/// First match wins:
/// 1. content type or declared kind says PDF → `Structural`
/// 2. content type starts with `image/` → `Optical`
/// 3. content type is missing or generic → retry 1–2 with the type guessed
///    from the display name's extension
/// 4. otherwise → `ClassifyError`
pub fn classify(attachment: &Attachment) -> Result<ExtractionStrategy, ClassifyError> {
    let content_type = attachment.content_type.trim().to_ascii_lowercase();
    let declared_pdf = attachment
        .declared_kind
        .as_deref()
        .map(|kind| kind.trim().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if declared_pdf {
        return Ok(ExtractionStrategy::Structural);
    }
    if let Some(strategy) = strategy_for_mime(&content_type) {
        return Ok(strategy);
    }

    if GENERIC_MIMES.contains(&content_type.as_str()) {
        if let Some(name) = attachment.display_name.as_deref() {
            let guessed = mime_guess::from_path(name).first_raw().unwrap_or_default();
            if let Some(strategy) = strategy_for_mime(guessed) {
                debug!("Classified {} by extension as {:?}", name, strategy);
                return Ok(strategy);
            }
        }
    }

    Err(ClassifyError {
        content_type: attachment.content_type.clone(),
        declared_kind: attachment.declared_kind.clone(),
    })
}

fn strategy_for_mime(mime: &str) -> Option<ExtractionStrategy> {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    if essence == PDF_MIME || essence == "application/x-pdf" {
        Some(ExtractionStrategy::Structural)
    } else if essence.starts_with("image/") {
        Some(ExtractionStrategy::Optical)
    } else {
        None
    }
}
