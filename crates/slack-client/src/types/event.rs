//! Inbound Events API payloads.

use serde::{Deserialize, Serialize};

/// Outer Events API envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    /// Set for `url_verification` handshakes.
    #[serde(default)]
    pub challenge: Option<String>,
    /// Set for `event_callback` deliveries.
    #[serde(default)]
    pub event: Option<AppMentionEvent>,
}

/// An `app_mention` event: someone addressed the bot in a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppMentionEvent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub user: Option<String>,
    pub channel: String,
    /// Timestamp of the mentioning message.
    pub ts: String,
    /// Parent thread timestamp when the mention was posted in a thread.
    #[serde(default)]
    pub thread_ts: Option<String>,
    /// Raw text including the `<@U...>` mention marker.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub files: Vec<SlackFile>,
}

impl AppMentionEvent {
    /// Thread to answer in: the existing thread, or a new one on this message.
    pub fn reply_thread(&self) -> &str {
        self.thread_ts.as_deref().unwrap_or(&self.ts)
    }
}

/// A file shared alongside a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackFile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// e.g. "application/pdf", "image/png"
    #[serde(default)]
    pub mimetype: String,
    /// Slack's short type, e.g. "pdf", "png"
    #[serde(default)]
    pub filetype: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url_private: Option<String>,
    #[serde(default)]
    pub url_private_download: Option<String>,
}

impl SlackFile {
    /// Best URL for fetching the bytes.
    pub fn download_url(&self) -> Option<&str> {
        self.url_private_download
            .as_deref()
            .or(self.url_private.as_deref())
    }
}
