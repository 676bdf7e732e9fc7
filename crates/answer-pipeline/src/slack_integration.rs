//! Integration with slack-client types.
//!
//! Converts `app_mention` events into [`InboundEvent`]s and lets a
//! [`SlackClient`] act as both the attachment fetcher and the delivery.
//!
//! Enabled by the default `slack` feature.

use async_trait::async_trait;
use slack_client::{AppMentionEvent, SlackClient, SlackError, SlackFile};
use solver_core::Attachment;
use tracing::{debug, error, warn};

use crate::delivery::{Delivery, DeliveryError, DocumentUpload, ReplyTarget};
use crate::event::InboundEvent;
use crate::fetcher::{AttachmentFetcher, FetchError};

/// Extension trait for converting a Slack mention into an [`InboundEvent`].
pub trait SlackEventExt {
    fn to_inbound_event(&self) -> InboundEvent;
}

/// Convert a shared Slack file into an [`Attachment`].
fn convert_file(file: &SlackFile) -> Attachment {
    Attachment {
        id: Some(file.id.clone()),
        content_type: file.mimetype.clone(),
        declared_kind: file.filetype.clone(),
        locator: file.download_url().map(str::to_string),
        display_name: file.name.clone().or_else(|| file.title.clone()),
    }
}

impl SlackEventExt for AppMentionEvent {
    fn to_inbound_event(&self) -> InboundEvent {
        InboundEvent {
            text: self.text.clone(),
            attachments: self.files.iter().map(convert_file).collect(),
            target: ReplyTarget::new(&self.channel).in_thread(self.reply_thread()),
        }
    }
}

impl From<SlackError> for DeliveryError {
    fn from(err: SlackError) -> Self {
        DeliveryError(err.to_string())
    }
}

fn log_failure(operation: &str, err: &SlackError) {
    if err.is_transient() {
        warn!("Slack {} failed, a retry may succeed: {}", operation, err);
    } else {
        error!("Slack {} failed: {}", operation, err);
    }
}

#[async_trait]
impl AttachmentFetcher for SlackClient {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError> {
        self.download(locator).await.map_err(|e| {
            log_failure("download", &e);
            FetchError(e.to_string())
        })
    }
}

#[async_trait]
impl Delivery for SlackClient {
    async fn send_text(&self, target: &ReplyTarget, text: &str) -> Result<(), DeliveryError> {
        self.post_message(&target.channel, text, target.thread.as_deref())
            .await
            .map_err(|e| {
                log_failure("chat.postMessage", &e);
                DeliveryError::from(e)
            })?;
        Ok(())
    }

    async fn send_document(
        &self,
        target: &ReplyTarget,
        document: DocumentUpload<'_>,
    ) -> Result<(), DeliveryError> {
        let bytes = tokio::fs::read(document.path)
            .await
            .map_err(|e| DeliveryError(format!("cannot read {}: {}", document.path.display(), e)))?;
        debug!("Uploading {} ({} bytes)", document.filename, bytes.len());

        self.upload_file(
            &target.channel,
            target.thread.as_deref(),
            document.filename,
            document.title,
            bytes,
            Some(document.caption),
        )
        .await
        .map_err(|e| {
            log_failure("file upload", &e);
            DeliveryError::from(e)
        })?;
        Ok(())
    }
}
