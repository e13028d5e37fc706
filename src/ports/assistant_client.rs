//! Assistant Client Port - Interface to the remote assistant provider.
//!
//! This port wraps the provider's thread/message/run API: a thread is the
//! provider-managed conversation context, a run is the asynchronous unit of
//! work that processes the thread's pending turn. Each operation is a single
//! request/response with no business logic and no internal retries - retry
//! policy belongs to the callers (the poller and the orchestrator).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::chat::RunStatus;

/// Port for the remote assistant provider's thread/message/run API.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Creates a new conversation thread and returns its opaque id.
    async fn create_thread(&self) -> Result<String, AssistantError>;

    /// Appends a message to a thread. Mutates remote state only.
    async fn post_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<(), AssistantError>;

    /// Starts asynchronous processing of the thread's unconsumed messages.
    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<String, AssistantError>;

    /// Read-only status probe for a run; no side effect.
    async fn run_status(&self, thread_id: &str, run_id: &str)
        -> Result<RunStatus, AssistantError>;

    /// Lists the thread's messages, newest first per provider convention.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError>;
}

/// Role of a message author on a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// The provider's wire name for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A message on a thread, flattened to plain text by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    pub role: MessageRole,
    /// Concatenated text content; empty when the message carries none.
    pub text: String,
}

impl ThreadMessage {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Assistant provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Provider returned a server-side error or is unreachable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AssistantError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if a later identical call could plausibly succeed.
    ///
    /// The poll loop keeps probing through transient errors (bounded by its
    /// wait budget) and aborts immediately on the rest.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AssistantError::Unavailable { .. }
                | AssistantError::Network(_)
                | AssistantError::Timeout { .. }
        )
    }
}
