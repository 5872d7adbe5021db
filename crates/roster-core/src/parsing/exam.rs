use super::header::HeaderToken;
use super::validate::{parse_calendar_date, parse_clock_time, split_emails};
use super::{field, required_text, TableSchema};
use crate::import::outcome::ImportIssue;
use crate::model::{ParsedExamRecord, RawRow, MAX_CODE_LEN, MAX_TITLE_LEN};

/// Exam bulk format:
/// `code;name;instructor emails;date;start time;end time`.
///
/// Instructor emails are comma-separated. The three schedule columns are
/// optional and may be blank.
pub struct ExamSchema;

const HEADER: &[HeaderToken] = &[
    HeaderToken {
        label: "code",
        aliases: &["code", "sigle"],
    },
    HeaderToken {
        label: "name",
        aliases: &["name", "nom", "title", "titre", "intitul"],
    },
    HeaderToken {
        label: "instructor",
        aliases: &["instructor", "enseignant", "lecturer", "professeur", "email"],
    },
];

impl TableSchema for ExamSchema {
    type Record = ParsedExamRecord;

    const COLUMNS: usize = 6;

    fn required_header() -> &'static [HeaderToken] {
        HEADER
    }

    fn build(row: &RawRow, warnings: &mut Vec<ImportIssue>) -> Result<ParsedExamRecord, String> {
        let code = required_text(field(row, 0), "code", MAX_CODE_LEN)?;
        let name = required_text(field(row, 1), "name", MAX_TITLE_LEN)?;

        let emails_raw = field(row, 2);
        if emails_raw.is_empty() {
            return Err("missing instructor emails".into());
        }
        let (instructor_emails, invalid) = split_emails(emails_raw);
        if !invalid.is_empty() {
            return Err(format!("invalid emails: {}", invalid.join(", ")));
        }
        if instructor_emails.is_empty() {
            return Err("missing instructor emails".into());
        }

        let date = optional(row, 3, warnings, "date", "YYYY-MM-DD", parse_calendar_date);
        let start_time = optional(row, 4, warnings, "start time", "HH:MM", parse_clock_time);
        let end_time = optional(row, 5, warnings, "end time", "HH:MM", parse_clock_time);

        Ok(ParsedExamRecord {
            code,
            name,
            instructor_emails,
            date,
            start_time,
            end_time,
        })
    }
}

/// Parse an optional column. Blank is absent; malformed is absent plus a warning
/// quoting the original text.
fn optional<T>(
    row: &RawRow,
    idx: usize,
    warnings: &mut Vec<ImportIssue>,
    name: &str,
    expected: &str,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = field(row, idx);
    if raw.is_empty() {
        return None;
    }
    let parsed = parse(raw);
    if parsed.is_none() {
        warnings.push(ImportIssue::degraded(
            row.line,
            format!("invalid {name} '{raw}' (expected {expected}), field ignored"),
        ));
    }
    parsed
}
