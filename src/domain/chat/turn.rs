//! Turn request and reply types.
//!
//! A turn is one visitor message and the assistant's answer to it. The
//! provider-assigned thread id is the only session state; the browser echoes
//! it back on every request and this service never invents one.

use thiserror::Error;

/// A single visitor turn submitted to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    /// The visitor's message, submitted to the provider verbatim.
    pub message: String,
    /// Provider thread id from a previous turn; `None` starts a new session.
    pub thread_id: Option<String>,
}

impl TurnRequest {
    /// Creates a turn request, enforcing the non-empty message invariant.
    ///
    /// An empty `thread_id` is normalized to `None` so a client that echoes
    /// an empty string still gets a fresh session rather than a provider 404.
    pub fn new(
        message: impl Into<String>,
        thread_id: Option<String>,
    ) -> Result<Self, InvalidTurn> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(InvalidTurn::EmptyMessage);
        }
        Ok(Self {
            message,
            thread_id: thread_id.filter(|id| !id.is_empty()),
        })
    }
}

/// Result of a completed turn, returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    /// The assistant's answer (or the fixed fallback string).
    pub response: String,
    /// The session id to echo on the next turn; always populated.
    pub thread_id: String,
}

/// Errors for turn requests that violate the data model invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidTurn {
    /// Message content is empty or whitespace only.
    #[error("message cannot be empty")]
    EmptyMessage,
}
