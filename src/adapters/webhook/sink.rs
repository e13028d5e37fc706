//! Webhook implementation of `LeadSink`.
//!
//! One POST to a fixed endpoint with the serialized record as the body; the
//! response body is never processed. The short client timeout keeps a slow
//! CRM from holding the delivery task open.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::lead::LeadRecord;
use crate::ports::{LeadSink, LeadSinkError};

/// Forwards leads to an external CRM webhook endpoint.
pub struct WebhookLeadSink {
    client: Client,
    endpoint: String,
}

impl WebhookLeadSink {
    /// Creates a sink for the given endpoint with a bounded request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl LeadSink for WebhookLeadSink {
    async fn deliver(&self, lead: &LeadRecord) -> Result<(), LeadSinkError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(lead)
            .send()
            .await
            .map_err(|e| LeadSinkError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LeadSinkError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(endpoint = %self.endpoint, "lead delivered");
        Ok(())
    }
}
