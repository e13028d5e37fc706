//! Pattern-based lead signal extraction.
//!
//! Pure function over a text blob: each field has an independent pattern
//! rule evaluated against the same input, absent matches yield empty fields,
//! and extraction never fails. No natural-language understanding is involved.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::record::LeadRecord;

/// Which side of the exchange lead fields are extracted from.
///
/// Visitor messages are unstructured prose; assistant replies are summaries
/// the assistant was instructed to format. The company `at`/`from` heuristic
/// only applies to visitor text, where prose like "I work at Acme" appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    #[default]
    User,
    Assistant,
}

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bname(?:\s+is)?\s*[-:]?\s*([^,\n]+)").expect("invalid name pattern")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("invalid email pattern")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?[0-9]{10,}").expect("invalid phone pattern"));

static COMPANY_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bcompany(?:\s+name)?(?:\s+is)?\s*[-:]?\s*([^,\n]+)")
        .expect("invalid company pattern")
});

// Capitalized phrase after "at"/"from"; deliberately case-sensitive on the
// phrase itself so ordinary prose ("from the start") does not match.
static COMPANY_PREP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:at|At|from|From)\s+([A-Z][A-Za-z0-9&.'-]*(?:\s+[A-Z][A-Za-z0-9&.'-]*)*)")
        .expect("invalid company preposition pattern")
});

static SMS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bsms\b[^\n]*?\b(yes|no)\b").expect("invalid sms pattern")
});

/// Extracts a contact record from conversation text.
///
/// Idempotent and side-effect free; field rules are evaluated independently
/// and absent matches yield empty strings. `sms_consent` defaults to `false`
/// when the label is absent or its value unrecognized.
pub fn extract(text: &str, source: ExtractionSource) -> LeadRecord {
    let mut record = LeadRecord::empty(text);

    record.name = captured(&NAME_RE, text);
    record.email = matched(&EMAIL_RE, text);
    record.phone = matched(&PHONE_RE, text);

    record.company = captured(&COMPANY_LABEL_RE, text);
    if record.company.is_empty() && source == ExtractionSource::User {
        record.company = captured(&COMPANY_PREP_RE, text);
    }

    record.sms_consent = SMS_RE
        .captures(text)
        .is_some_and(|c| c[1].eq_ignore_ascii_case("yes"));

    record
}

/// First capture group of the first match, trimmed; empty when absent.
fn captured(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// The whole first match; empty when absent.
fn matched(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
