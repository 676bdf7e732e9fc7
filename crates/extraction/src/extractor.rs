//! Strategy dispatch and the minimum-length gate.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classify::ExtractionStrategy;
use crate::error::ExtractionError;
use crate::ocr::OcrEngine;
use crate::pdf::{PageTextReader, PdfExtractReader};
use crate::render::{PageRenderer, PdftoppmRenderer};
use crate::sanitize::{normalize_ocr_text, normalize_page_text};
use crate::types::{ExtractedDocument, SourceKind, PAGE_SEPARATOR};

/// What to do with a PDF whose text layer is below the minimum length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScannedPdfPolicy {
    /// Fail with [`ExtractionError::BelowMinimumLength`].
    #[default]
    Reject,
    /// Render each page and run OCR over it.
    OcrFallback,
}

impl FromStr for ScannedPdfPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "ocr_fallback" | "ocr" => Ok(Self::OcrFallback),
            other => Err(format!("unknown scanned PDF policy: {}", other)),
        }
    }
}

impl fmt::Display for ScannedPdfPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::OcrFallback => write!(f, "ocr_fallback"),
        }
    }
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Shortest trimmed text, in characters, that counts as a real question.
    pub min_text_length: usize,
    pub scanned_pdf_policy: ScannedPdfPolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_text_length: 10,
            scanned_pdf_policy: ScannedPdfPolicy::Reject,
        }
    }
}

/// Runs an [`ExtractionStrategy`] over attachment bytes.
#[derive(Clone)]
pub struct TextExtractor {
    reader: Arc<dyn PageTextReader>,
    ocr: Arc<dyn OcrEngine>,
    renderer: Arc<dyn PageRenderer>,
    config: ExtractorConfig,
}

impl fmt::Debug for TextExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextExtractor")
            .field("ocr", &self.ocr.name())
            .field("config", &self.config)
            .finish()
    }
}

impl TextExtractor {
    /// Extractor using `pdf-extract` for PDFs and `ocr` for images.
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            reader: Arc::new(PdfExtractReader),
            ocr,
            renderer: Arc::new(PdftoppmRenderer::default()),
            config: ExtractorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_reader(mut self, reader: Arc<dyn PageTextReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn PageRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract, normalize and length-check the text of one attachment.
    pub async fn extract(
        &self,
        strategy: ExtractionStrategy,
        bytes: &[u8],
    ) -> Result<ExtractedDocument, ExtractionError> {
        let document = match strategy {
            ExtractionStrategy::Structural => self.extract_structural(bytes).await?,
            ExtractionStrategy::Optical => self.extract_optical(bytes).await?,
        };

        self.check_length(&document)?;
        info!(
            "Extracted {} chars from {} page(s) ({:?})",
            document.char_len(),
            document.page_count.unwrap_or(0),
            document.source_kind
        );
        Ok(document)
    }

    async fn extract_structural(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let reader = Arc::clone(&self.reader);
        let owned = bytes.to_vec();
        let pages = tokio::task::spawn_blocking(move || reader.read_pages(&owned))
            .await
            .map_err(|e| {
                // pdf-extract panics on some broken inputs; treat that as malformed.
                ExtractionError::Malformed(format!("PDF reader aborted: {}", e))
            })??;

        if pages.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let page_count = pages.len();
        let text = join_pages(pages.iter().map(|p| normalize_page_text(p)));
        let document = ExtractedDocument {
            text,
            page_count: Some(page_count),
            source_kind: SourceKind::Structural,
        };

        if document.content_len() < self.config.min_text_length
            && self.config.scanned_pdf_policy == ScannedPdfPolicy::OcrFallback
        {
            warn!(
                "Text layer has {} chars across {} page(s), falling back to OCR",
                document.content_len(),
                page_count
            );
            return self.extract_rendered(bytes).await;
        }

        Ok(document)
    }

    async fn extract_rendered(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let images = self.renderer.render_pages(bytes).await?;
        let mut pages = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            let raw = self.ocr.recognize(image).await?;
            debug!("OCR page {}: {} chars", index + 1, raw.len());
            pages.push(normalize_ocr_text(&raw));
        }

        Ok(ExtractedDocument {
            page_count: Some(images.len()),
            text: join_pages(pages),
            source_kind: SourceKind::Optical,
        })
    }

    async fn extract_optical(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let raw = self.ocr.recognize(bytes).await?;
        debug!("{} returned {} bytes", self.ocr.name(), raw.len());
        Ok(ExtractedDocument {
            text: normalize_ocr_text(&raw),
            page_count: Some(1),
            source_kind: SourceKind::Optical,
        })
    }

    /// Page separators do not count towards the minimum.
    fn check_length(&self, document: &ExtractedDocument) -> Result<(), ExtractionError> {
        let length = document.content_len();
        if length < self.config.min_text_length {
            warn!(
                "Extracted text below minimum ({} < {})",
                length, self.config.min_text_length
            );
            return Err(ExtractionError::BelowMinimumLength {
                length,
                minimum: self.config.min_text_length,
            });
        }
        Ok(())
    }
}

/// Join non-empty page texts with [`PAGE_SEPARATOR`].
fn join_pages(pages: impl IntoIterator<Item = String>) -> String {
    pages
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
        .trim()
        .to_string()
}
