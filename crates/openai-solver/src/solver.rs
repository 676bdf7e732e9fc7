//! OpenAiSolver implementation using a chat-completions API.

use reqwest::{Client, StatusCode};
use solver_core::{async_trait, Solver, SolverAnswer, SolverError, SolverRequest};
use tracing::{debug, info, warn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::OpenAiSolverConfig;

/// A solver that asks an OpenAI-compatible chat-completions endpoint.
///
/// Stateless: every request is a fresh two-message conversation.
pub struct OpenAiSolver {
    client: Client,
    config: OpenAiSolverConfig,
}

impl OpenAiSolver {
    /// Create a new OpenAiSolver with the given configuration.
    pub fn new(config: OpenAiSolverConfig) -> Result<Self, SolverError> {
        if config.api_key.is_empty() {
            return Err(SolverError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                SolverError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "OpenAiSolver initialized with brief model: {}, detailed model: {}",
            config.brief_model, config.detailed_model
        );

        Ok(Self { client, config })
    }

    /// Create an OpenAiSolver from environment variables.
    ///
    /// See [`OpenAiSolverConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, SolverError> {
        let config = OpenAiSolverConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiSolverConfig {
        &self.config
    }

    /// Build the chat-completions request body for a solver request.
    fn build_request(&self, request: &SolverRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model_for(request.profile).to_string(),
            messages: vec![
                ChatMessage::system(request.system_instruction.clone()),
                ChatMessage::user(request.user_content.clone()),
            ],
            max_tokens: self.config.max_tokens_for(request.profile),
            temperature: self.config.temperature,
        }
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, SolverError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );

        debug!(
            "Sending request to {} (model={}, messages={})",
            url,
            body.model,
            body.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| SolverError::Unavailable(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);
            return Err(classify_status(status, detail));
        }

        response
            .json()
            .await
            .map_err(|e| SolverError::Rejected(format!("Failed to parse response: {}", e)))
    }
}

/// Map a non-success HTTP status to the solver error taxonomy.
fn classify_status(status: StatusCode, detail: String) -> SolverError {
    let message = format!("API error ({}): {}", status.as_u16(), detail);
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        SolverError::Unavailable(message)
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        SolverError::Configuration(message)
    } else {
        SolverError::Rejected(message)
    }
}

/// Pull the answer text out of a completion, treating empty output as a rejection.
fn answer_from_completion(
    completion: ChatCompletionResponse,
    requested_model: &str,
) -> Result<SolverAnswer, SolverError> {
    let model = completion
        .model
        .clone()
        .unwrap_or_else(|| requested_model.to_string());

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| SolverError::Rejected("No choices in response".to_string()))?;

    if let Some(refusal) = choice.message.refusal {
        return Err(SolverError::Rejected(refusal));
    }

    let text = choice.message.content.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(SolverError::Rejected("Empty completion".to_string()));
    }

    if choice.finish_reason.as_deref() == Some("length") {
        warn!("Completion from {} was cut off at the token limit", model);
    }

    Ok(SolverAnswer::new(text).with_model(model))
}

#[async_trait]
impl Solver for OpenAiSolver {
    async fn solve(&self, request: SolverRequest) -> Result<SolverAnswer, SolverError> {
        let body = self.build_request(&request);
        info!(
            "Solving {} request with model {} ({} chars of content)",
            request.profile,
            body.model,
            request.user_content.chars().count()
        );

        let completion = self.chat_completion(&body).await?;
        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage: prompt={}, completion={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        let answer = answer_from_completion(completion, &body.model)?;
        info!("Received answer: {} chars", answer.char_len());
        Ok(answer)
    }

    fn name(&self) -> &str {
        "OpenAiSolver"
    }

    async fn is_ready(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_types::{Choice, ResponseMessage};
    use solver_core::SolverProfile;

    fn test_solver() -> OpenAiSolver {
        let config = OpenAiSolverConfig::builder()
            .api_key("test-key")
            .brief_model("mini")
            .detailed_model("full")
            .build();
        OpenAiSolver::new(config).unwrap()
    }

    fn completion(content: Option<&str>, finish: Option<&str>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            model: None,
            choices: vec![Choice {
                message: ResponseMessage {
                    content: content.map(str::to_string),
                    refusal: None,
                },
                finish_reason: finish.map(str::to_string),
            }],
            usage: None,
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = OpenAiSolver::new(OpenAiSolverConfig::default());
        assert!(matches!(result, Err(SolverError::Configuration(_))));
    }

    #[test]
    fn test_build_request_uses_profile_model() {
        let solver = test_solver();

        let brief = solver.build_request(&SolverRequest::new("sys", "q", SolverProfile::Brief));
        assert_eq!(brief.model, "mini");
        assert_eq!(brief.max_tokens, Some(1024));
        assert_eq!(brief.messages[0].role, "system");
        assert_eq!(brief.messages[0].content, "sys");
        assert_eq!(brief.messages[1].content, "q");

        let detailed =
            solver.build_request(&SolverRequest::new("sys", "q", SolverProfile::Detailed));
        assert_eq!(detailed.model, "full");
        assert_eq!(detailed.max_tokens, Some(4096));
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE, "down".into()),
            SolverError::Unavailable(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down".into()),
            SolverError::Unavailable(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "context length".into()),
            SolverError::Rejected(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "bad key".into()),
            SolverError::Configuration(_)
        ));
    }

    #[test]
    fn test_answer_from_completion() {
        let answer = answer_from_completion(completion(Some("A1: 4"), Some("stop")), "mini").unwrap();
        assert_eq!(answer.text, "A1: 4");
        assert_eq!(answer.model.as_deref(), Some("mini"));
    }

    #[test]
    fn test_empty_completion_is_rejected() {
        let result = answer_from_completion(completion(Some("   "), Some("stop")), "mini");
        assert!(matches!(result, Err(SolverError::Rejected(_))));

        let result = answer_from_completion(completion(None, None), "mini");
        assert!(matches!(result, Err(SolverError::Rejected(_))));
    }

    #[test]
    fn test_no_choices_is_rejected() {
        let empty = ChatCompletionResponse {
            model: Some("mini".into()),
            choices: vec![],
            usage: None,
        };
        assert!(matches!(
            answer_from_completion(empty, "mini"),
            Err(SolverError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let config = OpenAiSolverConfig::builder()
            .api_key("k")
            .api_url("http://127.0.0.1:9")
            .request_timeout(std::time::Duration::from_secs(2))
            .build();
        let solver = OpenAiSolver::new(config).unwrap();
        let result = solver
            .solve(SolverRequest::new("sys", "q", SolverProfile::Brief))
            .await;
        assert!(matches!(result, Err(SolverError::Unavailable(_))));
    }
}
