//! Inbound request types.

use serde::{Deserialize, Serialize};

/// Where a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// The user attached a file.
    FileAttachment,
    /// The user typed a question.
    PlainText,
}

/// A file attached to an inbound event.
///
/// Only metadata lives here. The payload is fetched later through the
/// `locator`, exactly once, by whoever processes the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Transport-assigned identifier, if any.
    pub id: Option<String>,
    /// MIME-like content type (e.g. "application/pdf", "image/png").
    pub content_type: String,
    /// Optional file type hint from the transport (e.g. "pdf", "png").
    pub declared_kind: Option<String>,
    /// Opaque locator used to fetch the bytes (URL, path).
    pub locator: Option<String>,
    /// Name shown to users.
    pub display_name: Option<String>,
}

impl Attachment {
    /// Create an attachment with a content type and locator.
    pub fn new(content_type: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            locator: Some(locator.into()),
            ..Default::default()
        }
    }

    /// Set the declared kind.
    pub fn with_declared_kind(mut self, kind: impl Into<String>) -> Self {
        self.declared_kind = Some(kind.into());
        self
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// A single unit of work for the pipeline.
///
/// Exactly one of `raw_text` and `attachment` is populated for a real
/// request. Both absent is the "empty mention" case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundRequest {
    /// Where the request came from.
    pub origin: Origin,
    /// The question text, for plain-text requests.
    pub raw_text: Option<String>,
    /// The file, for attachment requests.
    pub attachment: Option<Attachment>,
}

impl InboundRequest {
    /// Create a plain-text request.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::PlainText,
            raw_text: Some(text.into()),
            attachment: None,
        }
    }

    /// Create an attachment request.
    pub fn file(attachment: Attachment) -> Self {
        Self {
            origin: Origin::FileAttachment,
            raw_text: None,
            attachment: Some(attachment),
        }
    }

    /// Create the "empty mention" request (no text, no file).
    pub fn empty() -> Self {
        Self {
            origin: Origin::PlainText,
            raw_text: None,
            attachment: None,
        }
    }

    /// Check whether the request carries nothing to answer.
    pub fn is_empty(&self) -> bool {
        self.attachment.is_none()
            && self
                .raw_text
                .as_deref()
                .map(|t| t.trim().is_empty())
                .unwrap_or(true)
    }
}
