//! OpenAI Assistants API client - implementation of `AssistantClient`.
//!
//! Wraps the provider's thread/message/run endpoints (Assistants v2). Every
//! call carries the bearer credential and the `OpenAI-Beta` protocol-version
//! marker. No retries here: the poller owns probe retries and everything
//! else fails the turn.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = OpenAiAssistantClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::chat::RunStatus;
use crate::ports::{AssistantClient, AssistantError, MessageRole, ThreadMessage};

/// Protocol-version marker required by the Assistants v2 API.
const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Configuration for the OpenAI assistant client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Per-call request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-call request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Assistants API client.
pub struct OpenAiAssistantClient {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiAssistantClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Builds a request with the auth and protocol-version headers applied.
    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header(BETA_HEADER.0, BETA_HEADER.1)
    }

    /// Maps a reqwest transport error into the port taxonomy.
    fn map_request_error(&self, e: reqwest::Error) -> AssistantError {
        if e.is_timeout() {
            AssistantError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else if e.is_connect() {
            AssistantError::network(format!("Connection failed: {}", e))
        } else {
            AssistantError::network(e.to_string())
        }
    }

    /// Classifies a non-success HTTP status into the port taxonomy.
    async fn check_status(&self, response: Response) -> Result<Response, AssistantError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AssistantError::AuthenticationFailed),
            400 | 404 | 422 => Err(AssistantError::InvalidRequest(error_body)),
            500..=599 => Err(AssistantError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AssistantError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, AssistantError> {
        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| AssistantError::parse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl AssistantClient for OpenAiAssistantClient {
    async fn create_thread(&self) -> Result<String, AssistantError> {
        let response = self
            .request(self.client.post(self.url("/threads")))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let thread: ThreadObject = self.parse_json(response).await?;
        tracing::debug!(thread_id = %thread.id, "thread created");
        Ok(thread.id)
    }

    async fn post_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<(), AssistantError> {
        let body = CreateMessageRequest {
            role: role.as_str(),
            content,
        };
        let response = self
            .request(
                self.client
                    .post(self.url(&format!("/threads/{}/messages", thread_id))),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        self.check_status(response).await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<String, AssistantError> {
        let body = CreateRunRequest { assistant_id };
        let response = self
            .request(
                self.client
                    .post(self.url(&format!("/threads/{}/runs", thread_id))),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let run: RunObject = self.parse_json(response).await?;
        tracing::debug!(run_id = %run.id, status = %run.status, "run created");
        Ok(run.id)
    }

    async fn run_status(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> Result<RunStatus, AssistantError> {
        let response = self
            .request(
                self.client
                    .get(self.url(&format!("/threads/{}/runs/{}", thread_id, run_id))),
            )
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let run: RunObject = self.parse_json(response).await?;
        Ok(run.status)
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError> {
        let response = self
            .request(
                self.client
                    .get(self.url(&format!("/threads/{}/messages", thread_id))),
            )
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let list: MessageListObject = self.parse_json(response).await?;
        Ok(list
            .data
            .into_iter()
            .map(|m| ThreadMessage::new(m.role, message_text(&m.content)))
            .collect())
    }
}

/// Flattens a message's content blocks to plain text.
///
/// Messages carry a list of typed blocks; only `text` blocks contribute.
/// A message with no text blocks flattens to the empty string, which the
/// orchestrator substitutes with its fallback reply.
fn message_text(content: &[ContentBlock]) -> String {
    content
        .iter()
        .filter_map(|block| block.text.as_ref().map(|t| t.value.as_str()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ----- Provider wire types -----

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ThreadObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RunObject {
    id: String,
    status: RunStatus,
}

#[derive(Debug, Deserialize)]
struct MessageListObject {
    data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
struct MessageObject {
    role: MessageRole,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<TextContent>,
}

#[derive(Debug, Deserialize)]
struct TextContent {
    value: String,
}
