//! The structured contact record forwarded to the CRM webhook.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact record opportunistically extracted from conversation text.
///
/// All identity fields are optional; absence is the empty string so the
/// serialized webhook payload always carries every key. Serializes camelCase
/// with an ISO-8601 timestamp, which is the CRM inbox's expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub sms_consent: bool,
    /// The source text the fields were extracted from.
    pub message: String,
    /// Set at extraction time.
    pub timestamp: DateTime<Utc>,
}

impl LeadRecord {
    /// Creates an all-empty record for the given source text.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            sms_consent: false,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Returns true when at least one identity field is populated.
    ///
    /// This is the forwarding gate: records without any identity are never
    /// sent to the webhook.
    pub fn has_identity(&self) -> bool {
        !self.name.is_empty()
            || !self.email.is_empty()
            || !self.phone.is_empty()
            || !self.company.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_has_no_identity() {
        let record = LeadRecord::empty("just chatting");
        assert!(!record.has_identity());
        assert_eq!(record.message, "just chatting");
    }

    #[test]
    fn any_identity_field_qualifies() {
        for field in ["name", "email", "phone", "company"] {
            let mut record = LeadRecord::empty("hi");
            match field {
                "name" => record.name = "Dana".to_string(),
                "email" => record.email = "dana@example.com".to_string(),
                "phone" => record.phone = "5551234567".to_string(),
                _ => record.company = "Acme".to_string(),
            }
            assert!(record.has_identity(), "{field} alone should qualify");
        }
    }

    #[test]
    fn serializes_camel_case() {
        let record = LeadRecord {
            sms_consent: true,
            ..LeadRecord::empty("hi")
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["smsConsent"], true);
        assert!(json.get("timestamp").is_some());
        assert!(json.get("sms_consent").is_none());
    }
}
