//! Configuration types for slack-client.

use std::env;
use std::time::Duration;

use crate::error::SlackError;

/// Default Web API base URL.
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Configuration for the Slack Web API.
#[derive(Clone)]
pub struct SlackConfig {
    /// Base URL for Web API methods (e.g., "https://slack.com/api").
    pub api_url: String,
    /// Bot user OAuth token (`xoxb-...`).
    pub bot_token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SlackConfig {
    /// Create a configuration for the public Slack API.
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            bot_token: bot_token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the client at a different API host.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load from `SLACK_BOT_TOKEN` and optional `SLACK_API_URL`.
    pub fn from_env() -> Result<Self, SlackError> {
        let token = env::var("SLACK_BOT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SlackError::Config("SLACK_BOT_TOKEN is not set".to_string()))?;

        let mut config = Self::new(token);
        if let Ok(url) = env::var("SLACK_API_URL") {
            if !url.trim().is_empty() {
                config = config.with_api_url(url);
            }
        }
        Ok(config)
    }

    /// URL for a Web API method.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_url, method)
    }
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("api_url", &self.api_url)
            .field("bot_token", &"[redacted]")
            .field("timeout", &self.timeout)
            .finish()
    }
}
