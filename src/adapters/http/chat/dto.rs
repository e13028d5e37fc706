//! Wire DTOs for the chat endpoint.
//!
//! Field names are camelCase to match what the embedded chat widget sends
//! and expects back.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The visitor's message.
    pub message: String,

    /// Session thread id from a previous turn; absent on the first turn.
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Success response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The assistant's reply.
    pub response: String,

    /// Session thread id to echo on the next turn.
    pub thread_id: String,
}

/// Error response body. Deliberately detail-free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
