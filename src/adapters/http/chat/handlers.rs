//! HTTP handlers for the chat endpoint.
//!
//! The handler is a thin shell over the orchestrator: it validates the turn
//! request and collapses every internal failure into one generic error body,
//! so provider error detail never reaches the visitor.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ChatOrchestrator;
use crate::domain::chat::TurnRequest;

use super::dto::{ChatRequest, ChatResponse, ErrorResponse};

/// Shared application state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub orchestrator: Arc<ChatOrchestrator>,
}

impl ChatAppState {
    /// Creates a new ChatAppState.
    pub fn new(orchestrator: Arc<ChatOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// API errors for the chat endpoint.
#[derive(Debug)]
pub enum ChatApiError {
    /// Request body violates the turn invariants.
    BadRequest(String),

    /// Server-side assistant credentials are absent.
    ///
    /// Config validation at startup makes this unreachable in a normally
    /// launched process; the variant keeps the legacy response contract for
    /// embedders that construct the router themselves.
    MissingCredentials,

    /// Any internal failure. The body is generic on purpose.
    Internal,
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ChatApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ChatApiError::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Missing API credentials".to_string(),
            ),
            ChatApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong.".to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// POST /api/chat - process one visitor turn.
///
/// # Errors
/// - 400 Bad Request: empty message
/// - 500 Internal Server Error: any turn failure, with a generic body
pub async fn post_chat(
    State(state): State<ChatAppState>,
    Json(body): Json<ChatRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let request = TurnRequest::new(body.message, body.thread_id)
        .map_err(|e| ChatApiError::BadRequest(e.to_string()))?;

    let reply = state.orchestrator.handle_turn(request).await.map_err(|e| {
        tracing::error!(error = %e, "turn failed");
        ChatApiError::Internal
    })?;

    Ok((
        StatusCode::OK,
        Json(ChatResponse {
            response: reply.response,
            thread_id: reply.thread_id,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_maps_to_400() {
        let response = ChatApiError::BadRequest("message cannot be empty".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "message cannot be empty");
    }

    #[tokio::test]
    async fn internal_error_body_is_generic() {
        let response = ChatApiError::Internal.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Something went wrong.");
    }

    #[tokio::test]
    async fn missing_credentials_keeps_legacy_body() {
        let response = ChatApiError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing API credentials");
    }
}
