use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@,;]+@[^\s@,;]+\.[^\s@,;]+$").expect("email pattern"));

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern"));

static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[01]\d|2[0-3]):[0-5]\d$").expect("time pattern"));

pub fn is_valid_email(s: &str) -> bool {
    EMAIL.is_match(s)
}

/// `YYYY-MM-DD`, and the date must exist on the calendar.
pub fn is_valid_calendar_date(s: &str) -> bool {
    parse_calendar_date(s).is_some()
}

/// `HH:MM` on a 24h clock.
pub fn is_valid_clock_time(s: &str) -> bool {
    parse_clock_time(s).is_some()
}

/// True if `s` has at least one character and at most `max` characters.
pub fn within_length(s: &str, max: usize) -> bool {
    !s.is_empty() && s.chars().count() <= max
}

pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn parse_clock_time(s: &str) -> Option<NaiveTime> {
    if !TIME_SHAPE.is_match(s) {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Split a comma-separated email list into (valid, invalid) entries.
///
/// Blank entries are dropped. Valid entries are deduplicated case-insensitively,
/// keeping the first spelling.
pub fn split_emails(s: &str) -> (Vec<String>, Vec<String>) {
    let mut valid: Vec<String> = Vec::new();
    let mut invalid = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if is_valid_email(part) {
            if !valid.iter().any(|v| v.eq_ignore_ascii_case(part)) {
                valid.push(part.to_string());
            }
        } else {
            invalid.push(part.to_string());
        }
    }

    (valid, invalid)
}
