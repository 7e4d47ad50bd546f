//! Date-shape detection and parsing shared by the profiler and learners.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Date patterns compiled once on first use.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap(),           // ISO date
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}").unwrap(),       // US date
        Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}").unwrap(),       // European date
        Regex::new(r"^\d{4}/\d{2}/\d{2}").unwrap(),           // Alt ISO
        Regex::new(r"^[A-Za-z]{3,9} \d{1,2}, \d{4}$").unwrap(), // Month name
    ]
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Check if a value looks like a date.
pub fn looks_like_date(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value))
}

/// Parse a string as a datetime using the known format list.
///
/// Values that do not match any date shape are rejected up front so that
/// bare numbers and free text never parse.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if !looks_like_date(trimmed) {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d.and_hms_opt(0, 0, 0).expect("midnight is valid"));
        }
    }
    None
}
