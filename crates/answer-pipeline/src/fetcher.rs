//! Attachment byte fetching.

use std::path::PathBuf;

use async_trait::async_trait;
use solver_core::Attachment;
use thiserror::Error;
use tracing::debug;

/// Fetching attachment bytes failed.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FetchError(pub String);

/// Resolves an attachment's locator to its bytes.
#[async_trait]
pub trait AttachmentFetcher: Send + Sync {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError>;
}

/// The bytes behind one attachment, fetched at most once.
///
/// [`ByteSource::fetch`] takes `self`, so a run cannot fetch the same payload
/// twice.
pub struct ByteSource<'a> {
    fetcher: &'a dyn AttachmentFetcher,
    attachment: &'a Attachment,
}

impl<'a> ByteSource<'a> {
    pub fn new(fetcher: &'a dyn AttachmentFetcher, attachment: &'a Attachment) -> Self {
        Self {
            fetcher,
            attachment,
        }
    }

    /// Fetch the payload. A missing locator fails without calling the fetcher.
    pub async fn fetch(self) -> Result<Vec<u8>, FetchError> {
        let locator = self
            .attachment
            .locator
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| FetchError("attachment has no locator".to_string()))?;

        let bytes = self.fetcher.fetch(locator).await?;
        debug!("Fetched {} bytes", bytes.len());
        Ok(bytes)
    }
}

/// Treats locators as paths on the local file system.
#[derive(Debug, Clone, Default)]
pub struct FileSystemFetcher {
    root: Option<PathBuf>,
}

impl FileSystemFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locators against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

#[async_trait]
impl AttachmentFetcher for FileSystemFetcher {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError> {
        let path = match &self.root {
            Some(root) => root.join(locator),
            None => PathBuf::from(locator),
        };
        tokio::fs::read(&path)
            .await
            .map_err(|e| FetchError(format!("{}: {}", path.display(), e)))
    }
}
