//! Shared types for the turn processing pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Conversation turn ───────────────────────────────────────────────

/// Who produced a turn of dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One attributed block of dialogue text from the upstream dialogue engine.
///
/// Immutable; consumed once by the turn processor. `is_final` is false for
/// in-progress transcription fragments, which the processor ignores for
/// user turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who spoke.
    pub role: Role,
    /// Transcribed text of the turn.
    pub text: String,
    /// Whether the upstream engine marked this turn finalized.
    pub is_final: bool,
    /// When the turn was received.
    #[serde(default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// A finalized user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            is_final: true,
            received_at: Utc::now(),
        }
    }

    /// A finalized assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            is_final: true,
            received_at: Utc::now(),
        }
    }
}

// ── Extracted records ───────────────────────────────────────────────

/// One service offered by the business, as spoken back in a confirmation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Service name, bullet/dash prefix stripped.
    pub name: String,
    /// Duration in minutes, always > 0.
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    /// Price in whole dollars.
    #[serde(rename = "price")]
    pub price_dollars: u32,
}

/// Day of the week, in the fixed monday..sunday ordering used for
/// range expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in range-expansion order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Position in the monday..sunday ordering.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }

    /// Parse a day name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "monday" => Some(Self::Monday),
            "tuesday" => Some(Self::Tuesday),
            "wednesday" => Some(Self::Wednesday),
            "thursday" => Some(Self::Thursday),
            "friday" => Some(Self::Friday),
            "saturday" => Some(Self::Saturday),
            "sunday" => Some(Self::Sunday),
            _ => None,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        };
        write!(f, "{s}")
    }
}

/// Open hours for one day. Only open days are ever emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursRecord {
    /// Which day.
    pub day: Weekday,
    /// Always true when emitted — closed days are simply absent.
    #[serde(rename = "isOpen")]
    pub is_open: bool,
    /// Opening time as spoken (e.g. "9am", "10:30am"), lowercased.
    pub start: String,
    /// Closing time as spoken, lowercased.
    pub end: String,
}

// ── Structured events (wire contract) ───────────────────────────────

/// Closed set of UI form fields a `fill_field` event may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Name,
    CustomCategory,
    Description,
    Phone,
    Email,
    Website,
    Services,
    WorkingHours,
}

/// Value carried by a `fill_field` event: a cleaned string or a record list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Services(Vec<ServiceRecord>),
    Hours(Vec<WorkingHoursRecord>),
}

/// Structured event sent to the external UI over the chat topic.
///
/// This is the wire contract: each variant serializes to a JSON object with
/// an `action` tag and a type-specific payload. No other shapes exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StructuredEvent {
    /// Raw user transcript, trimmed.
    UserMessage { text: String },
    /// Raw assistant text, unmodified. Always the last event of a turn.
    AiMessage { text: String },
    /// A parsed onboarding field for the UI form.
    FillField { field: FieldKey, value: FieldValue },
    /// A numbered onboarding step finished.
    StepComplete { step: u32 },
    /// UI should surface the Gmail connect button.
    ShowGmailConnect,
    /// UI should surface the Calendar connect button.
    ShowCalendarConnect,
    /// Terminal signal: the voice onboarding flow is done.
    VoiceComplete,
}

impl StructuredEvent {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UserMessage { .. } => "user_message",
            Self::AiMessage { .. } => "ai_message",
            Self::FillField { .. } => "fill_field",
            Self::StepComplete { .. } => "step_complete",
            Self::ShowGmailConnect => "show_gmail_connect",
            Self::ShowCalendarConnect => "show_calendar_connect",
            Self::VoiceComplete => "voice_complete",
        }
    }

    /// Convenience constructor for a text-valued `fill_field`.
    pub fn fill_text(field: FieldKey, value: impl Into<String>) -> Self {
        Self::FillField {
            field,
            value: FieldValue::Text(value.into()),
        }
    }
}
