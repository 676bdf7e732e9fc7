//! Optical character recognition.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use crate::command::run_with_timeout;
use crate::error::ExtractionError;

/// Recognizes text in a single raster image.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Return the raw recognized text of `image`.
    async fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError>;

    /// Engine name for logs.
    fn name(&self) -> &str;
}

/// [`OcrEngine`] that shells out to the `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: String,
    language: String,
    timeout: Duration,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            language: "eng".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl TesseractCli {
    /// Engine with the given recognition language (tesseract `-l` code).
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    /// Use a different tesseract executable.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Per-image time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Recognition language.
    pub fn language(&self) -> &str {
        &self.language
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError> {
        if image.is_empty() {
            return Err(ExtractionError::OcrUnavailable("empty image buffer".to_string()));
        }

        let mut input = NamedTempFile::new()
            .map_err(|e| ExtractionError::OcrUnavailable(format!("temp file: {}", e)))?;
        input
            .write_all(image)
            .map_err(|e| ExtractionError::OcrUnavailable(format!("temp file: {}", e)))?;

        debug!(
            "Running {} on {} bytes (lang={})",
            self.binary,
            image.len(),
            self.language
        );

        let output = run_with_timeout(
            Command::new(&self.binary)
                .arg(input.path())
                .arg("stdout")
                .arg("-l")
                .arg(&self.language),
            self.timeout,
        )
        .await
        .map_err(ExtractionError::OcrUnavailable)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
