//! Intent classification from assistant phrasing.
//!
//! The dialogue engine never emits explicit stage-transition signals, so
//! step boundaries are inferred from fixed phrase lists. The heuristics are
//! deliberately isolated behind [`IntentClassifier`] so they can be swapped
//! for an explicit protocol later without touching the turn processor.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::pipeline::types::StructuredEvent;

/// Classifies a block of assistant text into zero or more intent events.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Vec<StructuredEvent>;
}

/// Literal triggers for surfacing the Gmail connect button.
const GMAIL_TRIGGERS: &[&str] = &["show_gmail_connect", "connect gmail button"];

/// Literal triggers for surfacing the Calendar connect button.
const CALENDAR_TRIGGERS: &[&str] = &["show_calendar_connect", "connect calendar button"];

/// Phrases that mean the assistant moved on to services (step 1 done).
const STEP1_PHRASES: &[&str] = &[
    "what services do you offer",
    "let's talk about your services",
    "let's talk about the services",
    "tell me about your services",
    "next, let's talk about the services",
    "what services does",
    "services you offer",
    "services does",
];

/// Phrases that mean the assistant moved on to hours (step 2 done).
const STEP2_PHRASES: &[&str] = &[
    "what are your business hours",
    "let's set up your business hours",
    "operating hours",
    "when are you open",
    "what are your business hours like",
    "how late do you stay open",
];

/// Phrases that mean onboarding is finished (step 3 done + terminal).
const STEP3_PHRASES: &[&str] = &[
    "your business is all set up",
    "you can now launch",
    "workspace is being set up",
];

static STEP_COMPLETE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"step[_\s]*complete[_\s]*(\d+)").unwrap());

/// Phrase-membership classifier. Stateless; every rule is evaluated
/// independently, so one turn can fire several intents.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhraseClassifier;

impl PhraseClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl IntentClassifier for PhraseClassifier {
    fn classify(&self, text: &str) -> Vec<StructuredEvent> {
        let lower = text.to_lowercase();
        let mut events = Vec::new();

        if contains_any(&lower, GMAIL_TRIGGERS) {
            debug!("Intent: show Gmail connect button");
            events.push(StructuredEvent::ShowGmailConnect);
        }

        if contains_any(&lower, CALENDAR_TRIGGERS) {
            debug!("Intent: show Calendar connect button");
            events.push(StructuredEvent::ShowCalendarConnect);
        }

        if let Some(caps) = STEP_COMPLETE_RE.captures(&lower)
            && let Ok(step) = caps[1].parse::<u32>()
        {
            debug!(step, "Intent: explicit step completion marker");
            events.push(StructuredEvent::StepComplete { step });
        }

        if contains_any(&lower, STEP1_PHRASES) {
            debug!("Intent: moving to services (step 1 complete)");
            events.push(StructuredEvent::StepComplete { step: 1 });
        }

        if contains_any(&lower, STEP2_PHRASES) {
            debug!("Intent: moving to hours (step 2 complete)");
            events.push(StructuredEvent::StepComplete { step: 2 });
        }

        if contains_any(&lower, STEP3_PHRASES) {
            debug!("Intent: onboarding finished (step 3 complete)");
            events.push(StructuredEvent::StepComplete { step: 3 });
            events.push(StructuredEvent::VoiceComplete);
        }

        events
    }
}

fn contains_any(haystack: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| haystack.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Vec<StructuredEvent> {
        PhraseClassifier::new().classify(text)
    }

    #[test]
    fn gmail_trigger_literal() {
        let events = classify("Okay! show_gmail_connect");
        assert_eq!(events, vec![StructuredEvent::ShowGmailConnect]);
    }

    #[test]
    fn gmail_trigger_phrase_case_insensitive() {
        let events = classify("I'll show the Connect Gmail button now.");
        assert_eq!(events, vec![StructuredEvent::ShowGmailConnect]);
    }

    #[test]
    fn calendar_trigger() {
        let events = classify("Here's the connect calendar button.");
        assert_eq!(events, vec![StructuredEvent::ShowCalendarConnect]);
    }

    #[test]
    fn explicit_step_complete_marker() {
        let events = classify("step_complete 2");
        assert_eq!(events, vec![StructuredEvent::StepComplete { step: 2 }]);
    }

    #[test]
    fn explicit_step_complete_with_spaces() {
        let events = classify("Step complete 1, moving on.");
        // Matches both the explicit marker and no topic phrases.
        assert_eq!(events, vec![StructuredEvent::StepComplete { step: 1 }]);
    }

    #[test]
    fn services_topic_implies_step_one() {
        let events = classify("Great! Now, what services do you offer?");
        assert_eq!(events, vec![StructuredEvent::StepComplete { step: 1 }]);
    }

    #[test]
    fn hours_topic_implies_step_two() {
        let events = classify("Perfect. What are your business hours?");
        assert_eq!(events, vec![StructuredEvent::StepComplete { step: 2 }]);
    }

    #[test]
    fn when_are_you_open_implies_step_two() {
        let events = classify("And when are you open during the week?");
        assert_eq!(events, vec![StructuredEvent::StepComplete { step: 2 }]);
    }

    #[test]
    fn all_set_up_is_terminal() {
        let events = classify("Perfect! Your business is all set up. You can now launch!");
        assert_eq!(
            events,
            vec![
                StructuredEvent::StepComplete { step: 3 },
                StructuredEvent::VoiceComplete,
            ]
        );
    }

    #[test]
    fn multiple_intents_fire_independently() {
        let events =
            classify("show_gmail_connect and show_calendar_connect, what services do you offer?");
        assert_eq!(
            events,
            vec![
                StructuredEvent::ShowGmailConnect,
                StructuredEvent::ShowCalendarConnect,
                StructuredEvent::StepComplete { step: 1 },
            ]
        );
    }

    #[test]
    fn plain_chat_yields_nothing() {
        assert!(classify("What's your business name?").is_empty());
        assert!(classify("Let me confirm your services: Haircut: 30 minutes, $50").is_empty());
    }
}
