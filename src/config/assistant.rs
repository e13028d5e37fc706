//! Assistant provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Assistant provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// API key for the assistant provider
    pub api_key: Option<Secret<String>>,

    /// Identifier of the hosted assistant that answers visitor turns
    pub assistant_id: Option<String>,

    /// Base URL for the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout in seconds for individual provider calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Delay between run status probes, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum total time to wait for a run to finish, in seconds
    #[serde(default = "default_poll_budget_secs")]
    pub poll_budget_secs: u64,
}

impl AssistantConfig {
    /// Get the API key, if configured
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }

    /// Check if both required credentials are present
    pub fn has_credentials(&self) -> bool {
        self.api_key().is_some()
            && self.assistant_id.as_ref().is_some_and(|id| !id.is_empty())
    }

    /// Get the per-call request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the delay between run status probes as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Get the maximum run wait budget as Duration
    pub fn poll_budget(&self) -> Duration {
        Duration::from_secs(self.poll_budget_secs)
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key().is_none() {
            return Err(ValidationError::MissingRequired("ASSISTANT_API_KEY"));
        }
        if !self.assistant_id.as_ref().is_some_and(|id| !id.is_empty()) {
            return Err(ValidationError::MissingRequired("ASSISTANT_ASSISTANT_ID"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.poll_interval_ms == 0 {
            return Err(ValidationError::InvalidPollInterval);
        }
        if self.poll_budget_secs * 1000 < self.poll_interval_ms {
            return Err(ValidationError::InvalidPollBudget);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant_id: None,
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_budget_secs: default_poll_budget_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_poll_budget_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AssistantConfig {
        AssistantConfig {
            api_key: Some(Secret::new("sk-test".to_string())),
            assistant_id: Some("asst_123".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.poll_budget_secs, 60);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_durations() {
        let config = configured();
        assert_eq!(config.poll_interval(), Duration::from_millis(1000));
        assert_eq!(config.poll_budget(), Duration::from_secs(60));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_requires_api_key() {
        let config = AssistantConfig {
            assistant_id: Some("asst_123".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("ASSISTANT_API_KEY"))
        ));
    }

    #[test]
    fn test_validation_requires_assistant_id() {
        let config = AssistantConfig {
            api_key: Some(Secret::new("sk-test".to_string())),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_empty_api_key_counts_as_missing() {
        let config = AssistantConfig {
            api_key: Some(Secret::new(String::new())),
            assistant_id: Some("asst_123".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_poll_bounds() {
        let config = AssistantConfig {
            poll_interval_ms: 0,
            ..configured()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPollInterval)
        ));

        let config = AssistantConfig {
            poll_interval_ms: 5000,
            poll_budget_secs: 2,
            ..configured()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPollBudget)
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(configured().validate().is_ok());
    }
}
