//! Slack Web API HTTP client.

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SlackConfig;
use crate::error::SlackError;
use crate::types::{
    ApiResponse, CompleteUploadParams, PostMessageParams, PostMessageResponse, SlackFile,
    UploadUrlResponse, UploadedFileRef,
};

/// Client for the Slack Web API, authenticated as a bot user.
#[derive(Clone)]
pub struct SlackClient {
    http: Client,
    config: SlackConfig,
}

impl SlackClient {
    /// Build a client. No request is made until the first call.
    pub fn new(config: SlackConfig) -> Result<Self, SlackError> {
        if config.bot_token.trim().is_empty() {
            return Err(SlackError::Config("bot token is empty".to_string()));
        }
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SlackError::Http)?;
        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &SlackConfig {
        &self.config
    }

    /// Download the bytes behind a private file URL.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, SlackError> {
        debug!("Downloading {}", url);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.bot_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Missing files:read scope gets a sign-in page instead of the file.
        let is_html = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("text/html"))
            .unwrap_or(false);
        if is_html {
            return Err(SlackError::Download(
                "received an HTML page instead of file content (check files:read scope)".to_string(),
            ));
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Download a shared file, preferring its download URL.
    pub async fn download_file(&self, file: &SlackFile) -> Result<Vec<u8>, SlackError> {
        let url = file
            .download_url()
            .ok_or_else(|| SlackError::Download(format!("file {} has no private URL", file.id)))?;
        self.download(url).await
    }

    /// Post a message and return its timestamp.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<String, SlackError> {
        let mut params = PostMessageParams::new(channel, text);
        if let Some(ts) = thread_ts {
            params = params.in_thread(ts);
        }

        let response: PostMessageResponse = self.call_json("chat.postMessage", &params).await?;
        if !response.ok {
            return Err(api_error("chat.postMessage", response.error));
        }
        Ok(response.ts.unwrap_or_default())
    }

    /// Upload a file into a channel (and thread) and return its file ID.
    ///
    /// Uses the external upload flow: reserve an upload URL, send the bytes
    /// there, then complete the upload to share it.
    pub async fn upload_file(
        &self,
        channel: &str,
        thread_ts: Option<&str>,
        filename: &str,
        title: &str,
        bytes: Vec<u8>,
        initial_comment: Option<&str>,
    ) -> Result<String, SlackError> {
        let length = bytes.len().to_string();
        let reserve: UploadUrlResponse = self
            .call_form(
                "files.getUploadURLExternal",
                &[("filename", filename), ("length", length.as_str())],
            )
            .await?;
        if !reserve.ok {
            return Err(api_error("files.getUploadURLExternal", reserve.error));
        }
        let (upload_url, file_id) = match (reserve.upload_url, reserve.file_id) {
            (Some(url), Some(id)) => (url, id),
            _ => {
                return Err(api_error(
                    "files.getUploadURLExternal",
                    Some("missing upload_url or file_id".to_string()),
                ))
            }
        };

        debug!("Uploading {} bytes as {} ({})", bytes.len(), filename, file_id);
        let response = self.http.post(&upload_url).body(bytes).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let complete = CompleteUploadParams {
            files: vec![UploadedFileRef {
                id: file_id.clone(),
                title: title.to_string(),
            }],
            channel_id: channel.to_string(),
            thread_ts: thread_ts.map(str::to_string),
            initial_comment: initial_comment.map(str::to_string),
        };
        let done: ApiResponse = self.call_json("files.completeUploadExternal", &complete).await?;
        if !done.ok {
            return Err(api_error("files.completeUploadExternal", done.error));
        }

        info!("Uploaded {} to {}", filename, channel);
        Ok(file_id)
    }

    async fn call_json<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<R, SlackError> {
        debug!("Slack call: {}", method);
        let response = self
            .http
            .post(self.config.method_url(method))
            .bearer_auth(&self.config.bot_token)
            .json(params)
            .send()
            .await?;
        Self::parse(method, response).await
    }

    async fn call_form<R: DeserializeOwned>(
        &self,
        method: &str,
        form: &[(&str, &str)],
    ) -> Result<R, SlackError> {
        debug!("Slack call: {}", method);
        let response = self
            .http
            .post(self.config.method_url(method))
            .bearer_auth(&self.config.bot_token)
            .form(form)
            .send()
            .await?;
        Self::parse(method, response).await
    }

    async fn parse<R: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> Result<R, SlackError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("{} returned HTTP {}", method, status);
            return Err(SlackError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

fn api_error(method: &str, error: Option<String>) -> SlackError {
    SlackError::Api {
        method: method.to_string(),
        error: error.unwrap_or_else(|| "unknown_error".to_string()),
    }
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("config", &self.config)
            .finish()
    }
}
