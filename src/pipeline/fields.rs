//! Business-profile field extraction from confirmation turns.
//!
//! Each field is a case-insensitive labeled line ("- Business name: Joe's
//! Cafe"). Extraction is best-effort and syntactic: candidates that fail
//! their length/content predicate are dropped silently, never surfaced as
//! errors. Conversational correction happens upstream.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::pipeline::types::{FieldKey, StructuredEvent};

/// Marker phrase that gates structured extraction on an assistant turn.
pub const CONFIRMATION_MARKER: &str = "let me confirm";

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[-•]?\s*business name:?\s*([^\n]+?)(?:\n|$)").unwrap()
});
static INDUSTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-•]?\s*industry:?\s*([^\n]+?)(?:\n|$)").unwrap());
static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-•]?\s*description:?\s*([^\n]+?)(?:\n|$)").unwrap());
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-•]?\s*phone:?\s*([^\n]+?)(?:\n|$)").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-•]?\s*email:?\s*([^\n]+?)(?:\n|$)").unwrap());
static WEBSITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[-•]?\s*website:?\s*([^\n]+?)(?:\n|$)").unwrap());

/// Trailing confirmation boilerplate ("Does this look correct?", ...)
/// that bleeds into a captured value on single-line confirmations.
static BOILERPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[,.]?\s*(does this|is this|correct).*$").unwrap());

/// Partial business profile extracted from one confirmation turn.
///
/// A field is populated only when it passed its predicate; absent fields
/// are never emitted downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl ProfileFields {
    /// True if no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.industry.is_none()
            && self.description.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.website.is_none()
    }

    /// One `fill_field` event per populated field, in the fixed
    /// name → industry → description → phone → email → website order.
    pub fn into_fill_events(self) -> Vec<StructuredEvent> {
        let mut events = Vec::new();
        let pairs = [
            (FieldKey::Name, self.name),
            (FieldKey::CustomCategory, self.industry),
            (FieldKey::Description, self.description),
            (FieldKey::Phone, self.phone),
            (FieldKey::Email, self.email),
            (FieldKey::Website, self.website),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                events.push(StructuredEvent::fill_text(field, value));
            }
        }
        events
    }
}

/// Extract business-profile fields from a confirmation turn's text.
pub fn extract_profile_fields(text: &str) -> ProfileFields {
    ProfileFields {
        name: capture(&NAME_RE, text).filter(|v| accept_plain(v, "name", 100)),
        industry: capture(&INDUSTRY_RE, text).filter(|v| accept_plain(v, "industry", 100)),
        description: capture(&DESCRIPTION_RE, text).filter(|v| accept_plain(v, "description", 200)),
        phone: capture(&PHONE_RE, text).filter(|v| accept_contact(v, "phone", 50)),
        email: capture(&EMAIL_RE, text)
            .filter(|v| accept_contact(v, "email", 100) && has_at_sign(v)),
        website: capture(&WEBSITE_RE, text).filter(|v| accept_contact(v, "website", 100)),
    }
}

/// Capture the labeled value and strip trailing confirmation boilerplate.
fn capture(re: &Regex, text: &str) -> Option<String> {
    let raw = re.captures(text)?.get(1)?.as_str().trim();
    let cleaned = BOILERPLATE_RE.replace(raw, "").trim().to_string();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

fn accept_plain(value: &str, field: &str, max_len: usize) -> bool {
    if value.len() >= max_len {
        debug!(field, len = value.len(), "Rejected field: exceeds length ceiling");
        return false;
    }
    true
}

/// Contact fields are additionally rejected when the assistant spoke a
/// placeholder ("none provided") instead of a value.
fn accept_contact(value: &str, field: &str, max_len: usize) -> bool {
    let lower = value.to_lowercase();
    if lower.contains("none") || lower.contains("not provided") {
        debug!(field, "Rejected field: placeholder value");
        return false;
    }
    accept_plain(value, field, max_len)
}

fn has_at_sign(value: &str) -> bool {
    if value.contains('@') {
        true
    } else {
        debug!(field = "email", "Rejected field: missing @");
        false
    }
}
