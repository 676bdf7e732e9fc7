//! Error types for slack-client.

use thiserror::Error;

/// Errors that can occur when talking to the Slack Web API.
#[derive(Debug, Error)]
pub enum SlackError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Slack answered with `ok: false`.
    #[error("{method} failed: {error}")]
    Api { method: String, error: String },

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// File download returned something other than the file.
    #[error("Download failed: {0}")]
    Download(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SlackError {
    /// Whether retrying the same call later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Api { error, .. } => error == "ratelimited" || error == "internal_error",
            _ => false,
        }
    }
}
