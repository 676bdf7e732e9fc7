//! Outbound Web API request and response bodies.

use serde::{Deserialize, Serialize};

/// Parameters for `chat.postMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessageParams {
    pub channel: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

impl PostMessageParams {
    pub fn new(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            thread_ts: None,
        }
    }

    pub fn in_thread(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }
}

/// Response from `chat.postMessage`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from `files.getUploadURLExternal`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadUrlResponse {
    pub ok: bool,
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One file entry in `files.completeUploadExternal`.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFileRef {
    pub id: String,
    pub title: String,
}

/// Parameters for `files.completeUploadExternal`.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteUploadParams {
    pub files: Vec<UploadedFileRef>,
    pub channel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_comment: Option<String>,
}

/// Bare `{ok, error}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}
