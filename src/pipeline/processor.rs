//! Turn processor — turns one conversation turn into an ordered event list.
//!
//! Flow for an assistant turn:
//! 1. Blank / duplicate suppression (one-slot window in `SessionState`)
//! 2. Gated extraction: profile fields, services, hours (confirmation turns)
//! 3. Intent classification (always)
//! 4. Trailing `ai_message` with the unmodified text (always last)
//!
//! User turns skip extraction entirely and map to a single `user_message`.
//! Extractors never see each other's output; their relative order only
//! exists so replayed turns produce byte-identical event sequences.

use tracing::{debug, info};

use crate::pipeline::fields::{self, CONFIRMATION_MARKER};
use crate::pipeline::hours;
use crate::pipeline::intent::{IntentClassifier, PhraseClassifier};
use crate::pipeline::services;
use crate::pipeline::types::{ConversationTurn, FieldKey, FieldValue, Role, StructuredEvent};
use crate::session::SessionState;

/// Turn processor — the core orchestrator of the extraction pipeline.
///
/// Side-effect-free except for the caller-owned [`SessionState`]; publishing
/// the returned events is the session worker's job.
pub struct TurnProcessor {
    classifier: Box<dyn IntentClassifier>,
}

impl Default for TurnProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProcessor {
    /// Processor with the stock phrase classifier.
    pub fn new() -> Self {
        Self::with_classifier(Box::new(PhraseClassifier::new()))
    }

    /// Processor with a custom intent classifier (swap seam for an explicit
    /// stage-transition protocol).
    pub fn with_classifier(classifier: Box<dyn IntentClassifier>) -> Self {
        Self { classifier }
    }

    /// Process a single turn into the ordered list of structured events.
    pub fn process(
        &self,
        state: &mut SessionState,
        turn: &ConversationTurn,
    ) -> Vec<StructuredEvent> {
        match turn.role {
            Role::User => self.process_user_turn(turn),
            Role::Assistant => self.process_assistant_turn(state, turn),
        }
    }

    /// User turns: no extraction, one trimmed `user_message` if final and
    /// non-blank.
    fn process_user_turn(&self, turn: &ConversationTurn) -> Vec<StructuredEvent> {
        let trimmed = turn.text.trim();
        if !turn.is_final || trimmed.is_empty() {
            return Vec::new();
        }
        info!(text = %trimmed, "User turn");
        vec![StructuredEvent::UserMessage {
            text: trimmed.to_string(),
        }]
    }

    fn process_assistant_turn(
        &self,
        state: &mut SessionState,
        turn: &ConversationTurn,
    ) -> Vec<StructuredEvent> {
        if turn.text.trim().is_empty() {
            return Vec::new();
        }
        if state.is_duplicate(&turn.text) {
            debug!("Skipped duplicate assistant turn");
            return Vec::new();
        }
        state.record(&turn.text);
        info!(text = %turn.text, "Assistant turn");

        let lower = turn.text.to_lowercase();
        let mut events = Vec::new();

        if lower.contains(CONFIRMATION_MARKER) {
            debug!("Confirmation turn, extracting structured data");

            let profile = fields::extract_profile_fields(&turn.text);
            events.extend(profile.into_fill_events());

            if lower.contains("service") {
                let services = services::extract_services(&turn.text);
                if services.is_empty() {
                    debug!("No services extracted from confirmation turn");
                } else {
                    events.push(StructuredEvent::FillField {
                        field: FieldKey::Services,
                        value: FieldValue::Services(services),
                    });
                }
            }

            if lower.contains("business hours") || lower.contains("hours:") {
                let hours = hours::extract_working_hours(&turn.text);
                if hours.is_empty() {
                    debug!("No working hours extracted from confirmation turn");
                } else {
                    events.push(StructuredEvent::FillField {
                        field: FieldKey::WorkingHours,
                        value: FieldValue::Hours(hours),
                    });
                }
            }
        }

        events.extend(self.classifier.classify(&turn.text));

        // The spoken-equivalent text always goes out, extraction or not,
        // and always last.
        events.push(StructuredEvent::AiMessage {
            text: turn.text.clone(),
        });
        events
    }
}
