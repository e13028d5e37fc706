//! Lead capture configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::lead::ExtractionSource;

/// Lead capture configuration
///
/// Forwarding is disabled entirely when no webhook URL is configured; the
/// chat still works, leads are simply not captured.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadConfig {
    /// CRM webhook endpoint that receives qualifying leads
    pub webhook_url: Option<String>,

    /// Which side of the exchange lead fields are extracted from
    #[serde(default)]
    pub extraction_source: ExtractionSource,

    /// Timeout in seconds for the fire-and-forget webhook call
    #[serde(default = "default_forward_timeout")]
    pub forward_timeout_secs: u64,
}

impl LeadConfig {
    /// Get the webhook timeout as Duration
    pub fn forward_timeout(&self) -> Duration {
        Duration::from_secs(self.forward_timeout_secs)
    }

    /// Check if lead forwarding is enabled
    pub fn forwarding_enabled(&self) -> bool {
        self.webhook_url.as_ref().is_some_and(|u| !u.is_empty())
    }

    /// Validate lead configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidWebhookUrl);
            }
        }
        if self.forward_timeout_secs == 0 || self.forward_timeout_secs > 30 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            extraction_source: ExtractionSource::default(),
            forward_timeout_secs: default_forward_timeout(),
        }
    }
}

fn default_forward_timeout() -> u64 {
    5
}
