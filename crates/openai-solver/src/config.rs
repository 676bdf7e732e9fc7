//! Configuration for OpenAiSolver.

use solver_core::{SolverError, SolverProfile};
use std::env;
use std::time::Duration;

/// Configuration for OpenAiSolver.
#[derive(Debug, Clone)]
pub struct OpenAiSolverConfig {
    /// API base URL (without the `/v1/...` path).
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model used for the brief profile.
    pub brief_model: String,

    /// Model used for the detailed profile.
    pub detailed_model: String,

    /// Maximum tokens for brief answers.
    pub brief_max_tokens: Option<u32>,

    /// Maximum tokens for detailed answers.
    pub detailed_max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// HTTP request timeout.
    pub request_timeout: Duration,
}

impl Default for OpenAiSolverConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            brief_model: "gpt-4o-mini".to_string(),
            detailed_model: "gpt-4o".to_string(),
            brief_max_tokens: Some(1024),
            detailed_max_tokens: Some(4096),
            temperature: Some(0.2),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl OpenAiSolverConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `SOLVER_PROFILE_BRIEF` - Model for typed questions (default: gpt-4o-mini)
    /// - `SOLVER_PROFILE_DETAILED` - Model for files (default: gpt-4o)
    /// - `SOLVER_MAX_TOKENS_BRIEF` - Max tokens for brief answers (default: 1024)
    /// - `SOLVER_MAX_TOKENS_DETAILED` - Max tokens for detailed answers (default: 4096)
    /// - `SOLVER_TEMPERATURE` - Temperature (default: 0.2)
    /// - `SOLVER_TIMEOUT_SECS` - HTTP timeout in seconds (default: 120)
    pub fn from_env() -> Result<Self, SolverError> {
        let defaults = Self::default();

        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| SolverError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let api_url = env::var("OPENAI_API_URL").unwrap_or(defaults.api_url);
        let brief_model = env::var("SOLVER_PROFILE_BRIEF").unwrap_or(defaults.brief_model);
        let detailed_model =
            env::var("SOLVER_PROFILE_DETAILED").unwrap_or(defaults.detailed_model);

        let brief_max_tokens = env::var("SOLVER_MAX_TOKENS_BRIEF")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.brief_max_tokens);

        let detailed_max_tokens = env::var("SOLVER_MAX_TOKENS_DETAILED")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.detailed_max_tokens);

        let temperature = env::var("SOLVER_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        let request_timeout = env::var("SOLVER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Ok(Self {
            api_url,
            api_key,
            brief_model,
            detailed_model,
            brief_max_tokens,
            detailed_max_tokens,
            temperature,
            request_timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> OpenAiSolverConfigBuilder {
        OpenAiSolverConfigBuilder::default()
    }

    /// Model for a profile.
    pub fn model_for(&self, profile: SolverProfile) -> &str {
        match profile {
            SolverProfile::Brief => &self.brief_model,
            SolverProfile::Detailed => &self.detailed_model,
        }
    }

    /// Token limit for a profile.
    pub fn max_tokens_for(&self, profile: SolverProfile) -> Option<u32> {
        match profile {
            SolverProfile::Brief => self.brief_max_tokens,
            SolverProfile::Detailed => self.detailed_max_tokens,
        }
    }
}

/// Builder for OpenAiSolverConfig.
#[derive(Debug, Default)]
pub struct OpenAiSolverConfigBuilder {
    config: OpenAiSolverConfig,
}

impl OpenAiSolverConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the brief-profile model.
    pub fn brief_model(mut self, model: impl Into<String>) -> Self {
        self.config.brief_model = model.into();
        self
    }

    /// Set the detailed-profile model.
    pub fn detailed_model(mut self, model: impl Into<String>) -> Self {
        self.config.detailed_model = model.into();
        self
    }

    /// Set the max tokens for brief answers.
    pub fn brief_max_tokens(mut self, tokens: u32) -> Self {
        self.config.brief_max_tokens = Some(tokens);
        self
    }

    /// Set the max tokens for detailed answers.
    pub fn detailed_max_tokens(mut self, tokens: u32) -> Self {
        self.config.detailed_max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the HTTP timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiSolverConfig {
        self.config
    }
}
