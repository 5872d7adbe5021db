use crate::model::MAX_CODE_LEN;
use regex::Regex;
use std::sync::LazyLock;

/// Version of the canonical-code rule. Bump whenever `normalize_code` changes
/// output for any input, since stored match decisions depend on it.
pub const NORMALIZER_VERSION: &str = "1";

/// Trailing sitting/session/part markers, matched against the uppercased code.
static SESSION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:[\s\-_/.]+(?:[A-Z]|\d|[SPQTB]\d{1,2}|(?:PART|SESSION|SESS|SEM|GROUP|GR) ?\d{1,2})|\s*\([A-Z0-9]{1,3}\))$",
    )
    .expect("session suffix pattern")
});

/// Map a free-form course or exam code to the key used for matching.
///
/// Rule v1:
/// 1. Trim and collapse inner whitespace runs to a single space
/// 2. Uppercase
/// 3. Strip trailing session markers ("-A", "_2", " S1", "/PART 2", "(B)"),
///    repeatedly, never down to an empty key
/// 4. Cap at the stored code length
pub fn normalize_code(raw: &str) -> String {
    let mut s = fold(raw);

    while let Some(m) = SESSION_SUFFIX.find(&s) {
        if m.start() == 0 {
            break;
        }
        s.truncate(m.start());
    }

    cap(s.trim_end())
}

/// Steps 1, 2 and 4 of `normalize_code`, keeping any session suffix.
///
/// Stored catalog codes are compared in this form: "MATH101-B" is its own
/// course, not a sitting of "MATH101".
pub fn canonical_form(raw: &str) -> String {
    cap(&fold(raw))
}

fn fold(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn cap(s: &str) -> String {
    s.chars().take(MAX_CODE_LEN).collect()
}
