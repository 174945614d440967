//! Service-list extraction from confirmation turns.
//!
//! Two mutually exclusive strategies, tried in order; the first that yields
//! any record wins:
//!
//! 1. Colon form:    `Haircut: 30 minutes, $50`
//! 2. Bulleted form: `- Haircut, 30 minutes, $50` / `• Haircut - 30 min - $50`

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::pipeline::types::ServiceRecord;

static COLON_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Z][^:\n]+?):\s*(\d+)\s*(?:minutes?|min)[,\s]+\$(\d+)").unwrap()
});
static BULLET_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[-•]\s*([^,\n]+?)\s*[,\-]\s*(\d+)\s*(?:minutes?|min)\s*[,\-]\s*\$?(\d+)")
        .unwrap()
});
static LEADING_BULLETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-•\s]+").unwrap());

/// Extract service records from a confirmation turn's text.
///
/// Returns an empty list when nothing parses; the caller logs that case
/// rather than treating it as an error.
pub fn extract_services(text: &str) -> Vec<ServiceRecord> {
    let colon = collect(&COLON_FORM, text, true);
    if !colon.is_empty() {
        return colon;
    }
    collect(&BULLET_FORM, text, false)
}

fn collect(re: &Regex, text: &str, strip_bullets: bool) -> Vec<ServiceRecord> {
    let mut records = Vec::new();
    for caps in re.captures_iter(text) {
        let raw_name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let name = if strip_bullets {
            LEADING_BULLETS.replace(raw_name, "").trim().to_string()
        } else {
            raw_name.trim().to_string()
        };

        let duration: Option<u32> = caps.get(2).and_then(|m| m.as_str().parse().ok());
        let price: Option<u32> = caps.get(3).and_then(|m| m.as_str().parse().ok());
        let (Some(duration_minutes), Some(price_dollars)) = (duration, price) else {
            debug!(name = %name, "Rejected service: unparseable duration or price");
            continue;
        };

        if name.is_empty() || name.len() >= 100 || duration_minutes == 0 {
            debug!(
                name = %name,
                duration = duration_minutes,
                "Rejected service: failed validity predicate"
            );
            continue;
        }

        debug!(
            name = %name,
            duration = duration_minutes,
            price = price_dollars,
            "Found service"
        );
        records.push(ServiceRecord {
            name,
            duration_minutes,
            price_dollars,
        });
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_form_list() {
        let text = "Let me confirm your services:\nHaircut: 30 minutes, $50\nShave: 15 minutes, $20";
        let services = extract_services(text);
        assert_eq!(
            services,
            vec![
                ServiceRecord {
                    name: "Haircut".into(),
                    duration_minutes: 30,
                    price_dollars: 50,
                },
                ServiceRecord {
                    name: "Shave".into(),
                    duration_minutes: 15,
                    price_dollars: 20,
                },
            ]
        );
    }

    #[test]
    fn colon_form_strips_leading_bullet() {
        let text = "- Beard Trim: 20 min, $25";
        let services = extract_services(text);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "Beard Trim");
        assert_eq!(services[0].duration_minutes, 20);
    }

    #[test]
    fn bulleted_comma_form() {
        let text = "- Deep Tissue Massage, 60 minutes, $90\n- Quick Massage, 30 min, $45";
        let services = extract_services(text);
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name, "Deep Tissue Massage");
        assert_eq!(services[1].price_dollars, 45);
    }

    #[test]
    fn bulleted_dash_form() {
        let text = "• Consultation - 45 min - $120";
        let services = extract_services(text);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "Consultation");
        assert_eq!(services[0].duration_minutes, 45);
        assert_eq!(services[0].price_dollars, 120);
    }

    #[test]
    fn colon_form_wins_over_bulleted() {
        // Both shapes present; strategy 1 is non-empty so strategy 2 never runs.
        let text = "Haircut: 30 minutes, $50\n- Ignored Thing, 10 min, $5";
        let services = extract_services(text);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "Haircut");
    }

    #[test]
    fn zero_duration_rejected() {
        let text = "Haircut: 0 minutes, $50";
        assert!(extract_services(text).is_empty());
    }

    #[test]
    fn free_service_accepted() {
        let text = "Consultation: 15 minutes, $0";
        let services = extract_services(text);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].price_dollars, 0);
    }

    #[test]
    fn overlong_name_rejected() {
        let text = format!("{}: 30 minutes, $50", "N".repeat(120));
        assert!(extract_services(&text).is_empty());
    }

    #[test]
    fn prose_without_services_yields_nothing() {
        let text = "Let me confirm what I have: a lovely chat about nothing.";
        assert!(extract_services(text).is_empty());
    }
}
