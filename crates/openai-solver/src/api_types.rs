//! Chat-completions request and response types.

use serde::{Deserialize, Serialize};

/// One role-tagged message sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system" carries the profile instruction, "user" the content
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// The profile instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// The extracted text or typed question.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model tier picked from the profile
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Answer length cap for the profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Successful completion body. Unused fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Exact model snapshot that answered
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Only the first choice is read.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    /// "length" means the answer hit the token cap
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant output.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Content (may be null when the model refuses)
    #[serde(default)]
    pub content: Option<String>,
    /// Refusal text, if the model declined
    #[serde(default)]
    pub refusal: Option<String>,
}

/// Token counts, logged at debug level.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    pub message: String,
    /// e.g. "invalid_request_error", "insufficient_quota"
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}
