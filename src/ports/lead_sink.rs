//! Lead Sink Port - Destination for captured leads.
//!
//! Delivery is best-effort: the orchestrator dispatches it on a detached
//! task and a failure is logged, never surfaced to the visitor.

use async_trait::async_trait;

use crate::domain::lead::LeadRecord;

/// Port for forwarding a qualifying lead record to an external inbox.
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Attempts one delivery of the record. No retries, no delivery guarantee.
    async fn deliver(&self, lead: &LeadRecord) -> Result<(), LeadSinkError>;
}

/// Lead delivery errors. Always swallowed by the caller, logged only.
#[derive(Debug, thiserror::Error)]
pub enum LeadSinkError {
    /// The endpoint answered with a non-success status.
    #[error("webhook rejected lead: status {status}")]
    Rejected {
        /// HTTP status code returned.
        status: u16,
    },

    /// Network error or timeout during delivery.
    #[error("webhook unreachable: {0}")]
    Unreachable(String),
}
