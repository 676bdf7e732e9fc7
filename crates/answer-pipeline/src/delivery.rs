//! Delivery trait and implementations.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// Where replies for one event go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplyTarget {
    /// Channel or conversation identifier.
    pub channel: String,
    /// Thread identifier, if replies should be threaded.
    pub thread: Option<String>,
}

impl ReplyTarget {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            thread: None,
        }
    }

    pub fn in_thread(mut self, thread: impl Into<String>) -> Self {
        self.thread = Some(thread.into());
        self
    }
}

/// A finished document waiting to be sent.
#[derive(Debug, Clone, Copy)]
pub struct DocumentUpload<'a> {
    /// Local file holding the rendered bytes. Removed after delivery.
    pub path: &'a Path,
    pub filename: &'a str,
    pub title: &'a str,
    pub caption: &'a str,
}

/// The destination refused or failed to take a payload.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DeliveryError(pub String);

/// Sends replies to the requester.
///
/// Abstracted to support different transports (Slack, local files, tests).
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Send one text message.
    async fn send_text(&self, target: &ReplyTarget, text: &str) -> Result<(), DeliveryError>;

    /// Send a document with a caption.
    async fn send_document(
        &self,
        target: &ReplyTarget,
        document: DocumentUpload<'_>,
    ) -> Result<(), DeliveryError>;
}

/// A delivery that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpDelivery;

#[async_trait]
impl Delivery for NoOpDelivery {
    async fn send_text(&self, _target: &ReplyTarget, _text: &str) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn send_document(
        &self,
        _target: &ReplyTarget,
        _document: DocumentUpload<'_>,
    ) -> Result<(), DeliveryError> {
        Ok(())
    }
}

/// A delivery that only logs what it would send.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingDelivery;

#[async_trait]
impl Delivery for LoggingDelivery {
    async fn send_text(&self, target: &ReplyTarget, text: &str) -> Result<(), DeliveryError> {
        info!("[delivery] text to {}: {} chars", target.channel, text.chars().count());
        Ok(())
    }

    async fn send_document(
        &self,
        target: &ReplyTarget,
        document: DocumentUpload<'_>,
    ) -> Result<(), DeliveryError> {
        info!(
            "[delivery] document {} to {} ({})",
            document.filename, target.channel, document.caption
        );
        Ok(())
    }
}

/// Prints text to stdout and copies documents into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    out_dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[async_trait]
impl Delivery for DirectoryDelivery {
    async fn send_text(&self, _target: &ReplyTarget, text: &str) -> Result<(), DeliveryError> {
        println!("{}", text);
        Ok(())
    }

    async fn send_document(
        &self,
        _target: &ReplyTarget,
        document: DocumentUpload<'_>,
    ) -> Result<(), DeliveryError> {
        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|e| DeliveryError(format!("cannot create {}: {}", self.out_dir.display(), e)))?;

        let dest = self.out_dir.join(document.filename);
        tokio::fs::copy(document.path, &dest)
            .await
            .map_err(|e| DeliveryError(format!("cannot write {}: {}", dest.display(), e)))?;

        println!("{} {}", document.caption, dest.display());
        Ok(())
    }
}
