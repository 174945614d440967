//! Working-hours extraction from confirmation turns.
//!
//! Strategy 1 matches per-day lines ("Monday: 9am - 5pm"). Strategy 2, used
//! only when strategy 1 yields nothing, expands a weekday range ("Monday to
//! Friday 9am to 5pm") over the fixed monday..sunday ordering. Ranges do not
//! wrap: "Friday to Monday" yields an empty list.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::pipeline::types::{Weekday, WorkingHoursRecord};

const DAY_NAMES: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
const TIME: &str = r"\d+(?::\d+)?(?:am|pm)?";

static DAY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({DAY_NAMES}):?\s*({TIME})\s*(?:-|to)\s*({TIME})")).unwrap()
});
static DAY_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)({DAY_NAMES})\s+to\s+({DAY_NAMES})\s+({TIME})\s+(?:to|-)\s+({TIME})"
    ))
    .unwrap()
});

/// Extract per-day open-hours records from a confirmation turn's text.
pub fn extract_working_hours(text: &str) -> Vec<WorkingHoursRecord> {
    // The tail of a range line ("... Friday 9am to 5pm") is also a valid
    // per-day match; spans inside a range match are reserved for strategy 2.
    let range_spans: Vec<(usize, usize)> = DAY_RANGE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut records = Vec::new();
    for caps in DAY_LINE.captures_iter(text) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        if range_spans
            .iter()
            .any(|&(start, end)| whole.start() >= start && whole.end() <= end)
        {
            continue;
        }
        let Some(day) = caps.get(1).and_then(|m| Weekday::from_name(m.as_str())) else {
            continue;
        };
        let record = open_record(day, &caps[2], &caps[3]);
        debug!(day = %record.day, start = %record.start, end = %record.end, "Found hours");
        records.push(record);
    }
    if !records.is_empty() {
        return records;
    }

    if let Some(caps) = DAY_RANGE.captures(text) {
        let start_day = Weekday::from_name(&caps[1]);
        let end_day = Weekday::from_name(&caps[2]);
        if let (Some(start_day), Some(end_day)) = (start_day, end_day) {
            if end_day.index() < start_day.index() {
                // No wraparound: an inverted range expands to nothing.
                debug!(start = %start_day, end = %end_day, "Inverted day range, no expansion");
            }
            for day in Weekday::ALL {
                if day.index() >= start_day.index() && day.index() <= end_day.index() {
                    let record = open_record(day, &caps[3], &caps[4]);
                    debug!(day = %record.day, start = %record.start, end = %record.end, "Found hours");
                    records.push(record);
                }
            }
        }
    }

    records
}

fn open_record(day: Weekday, start: &str, end: &str) -> WorkingHoursRecord {
    WorkingHoursRecord {
        day,
        is_open: true,
        start: start.to_lowercase(),
        end: end.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(records: &[WorkingHoursRecord]) -> Vec<Weekday> {
        records.iter().map(|r| r.day).collect()
    }

    #[test]
    fn per_day_lines_with_dash() {
        let text = "Let me confirm your business hours:\n\
            Monday: 9am - 5pm\n\
            Tuesday: 10am - 4pm";
        let records = extract_working_hours(text);
        assert_eq!(days(&records), vec![Weekday::Monday, Weekday::Tuesday]);
        assert_eq!(records[0].start, "9am");
        assert_eq!(records[1].end, "4pm");
        assert!(records.iter().all(|r| r.is_open));
    }

    #[test]
    fn per_day_line_with_to_separator() {
        let records = extract_working_hours("Saturday 10am to 2pm");
        assert_eq!(days(&records), vec![Weekday::Saturday]);
        assert_eq!(records[0].start, "10am");
        assert_eq!(records[0].end, "2pm");
    }

    #[test]
    fn minutes_in_times_preserved() {
        let records = extract_working_hours("Wednesday: 9:30am - 5:45pm");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start, "9:30am");
        assert_eq!(records[0].end, "5:45pm");
    }

    #[test]
    fn times_are_lowercased() {
        let records = extract_working_hours("Monday: 9AM - 5PM");
        assert_eq!(records[0].start, "9am");
        assert_eq!(records[0].end, "5pm");
    }

    #[test]
    fn range_expands_to_five_days() {
        let records = extract_working_hours("Monday to Friday 9am to 5pm");
        assert_eq!(
            days(&records),
            vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
            ]
        );
        for record in &records {
            assert!(record.is_open);
            assert_eq!(record.start, "9am");
            assert_eq!(record.end, "5pm");
        }
    }

    #[test]
    fn range_with_dash_times() {
        let records = extract_working_hours("Tuesday to Thursday 8am - 6pm");
        assert_eq!(
            days(&records),
            vec![Weekday::Tuesday, Weekday::Wednesday, Weekday::Thursday]
        );
    }

    #[test]
    fn single_day_range() {
        let records = extract_working_hours("Sunday to Sunday 11am to 3pm");
        assert_eq!(days(&records), vec![Weekday::Sunday]);
    }

    #[test]
    fn inverted_range_yields_nothing() {
        // Deliberate no-wrap policy: Friday..Monday is empty, not a wrap.
        let records = extract_working_hours("Friday to Monday 9am to 5pm");
        assert!(records.is_empty());
    }

    #[test]
    fn per_day_lines_take_precedence_over_range() {
        let text = "Monday: 9am - 5pm\nTuesday to Friday 10am to 4pm";
        let records = extract_working_hours(text);
        assert_eq!(days(&records), vec![Weekday::Monday]);
    }

    #[test]
    fn prose_without_hours_yields_nothing() {
        assert!(extract_working_hours("We're open most days, whenever.").is_empty());
    }
}
