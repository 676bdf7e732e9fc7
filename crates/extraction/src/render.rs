//! PDF page rasterization, used when a PDF has no usable text layer.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::{NamedTempFile, TempDir};
use tokio::process::Command;
use tracing::debug;

use crate::command::run_with_timeout;
use crate::error::ExtractionError;

/// Renders every page of a PDF to an image buffer.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// One encoded image per page, in page order.
    async fn render_pages(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, ExtractionError>;
}

/// [`PageRenderer`] that shells out to poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdftoppmRenderer {
    binary: String,
    dpi: u32,
    timeout: Duration,
}

impl Default for PdftoppmRenderer {
    fn default() -> Self {
        Self {
            binary: "pdftoppm".to_string(),
            dpi: 300,
            timeout: Duration::from_secs(180),
        }
    }
}

impl PdftoppmRenderer {
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PageRenderer for PdftoppmRenderer {
    async fn render_pages(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, ExtractionError> {
        let fail = |e: std::io::Error| ExtractionError::RenderFailed(e.to_string());

        let mut input = NamedTempFile::new().map_err(fail)?;
        input.write_all(pdf).map_err(fail)?;
        let out_dir = TempDir::new().map_err(fail)?;
        let prefix = out_dir.path().join("page");

        debug!("Rendering PDF pages at {} dpi", self.dpi);
        run_with_timeout(
            Command::new(&self.binary)
                .arg("-png")
                .arg("-r")
                .arg(self.dpi.to_string())
                .arg(input.path())
                .arg(&prefix),
            self.timeout,
        )
        .await
        .map_err(ExtractionError::RenderFailed)?;

        // pdftoppm zero-pads page numbers, so name order is page order.
        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(out_dir.path()).await.map_err(fail)?;
        while let Some(entry) = entries.next_entry().await.map_err(fail)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("png") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            images.push(tokio::fs::read(&path).await.map_err(fail)?);
        }

        if images.is_empty() {
            return Err(ExtractionError::RenderFailed("no pages rendered".to_string()));
        }
        Ok(images)
    }
}
