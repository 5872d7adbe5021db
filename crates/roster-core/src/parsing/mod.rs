pub mod course;
pub mod exam;
pub mod header;
pub mod normalize;
pub mod validate;

use crate::import::outcome::ImportIssue;
use crate::model::RawRow;
use header::{missing_header_tokens, HeaderToken};
use serde::Serialize;

/// Default column delimiter of both bulk formats.
pub const DEFAULT_DELIMITER: char = ';';

/// Layout of one bulk format: its columns and how a row becomes a record.
pub trait TableSchema {
    type Record;

    /// Number of positional columns. Fields beyond the last one are folded
    /// back into it, delimiters included.
    const COLUMNS: usize;

    /// Tokens the header line must mention.
    fn required_header() -> &'static [HeaderToken];

    /// Build a record from a split row.
    ///
    /// A required-field violation returns `Err(reason)` and the row is dropped.
    /// Malformed optional fields are cleared and reported through `warnings`.
    fn build(row: &RawRow, warnings: &mut Vec<ImportIssue>) -> Result<Self::Record, String>;
}

/// Rows that passed validation, plus everything that was reported on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput<R> {
    pub rows: Vec<R>,
    pub errors: Vec<ImportIssue>,
    pub warnings: Vec<ImportIssue>,
}

impl<R> Default for ParseOutput<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Parse delimited text into records following schema `S`.
///
/// The first non-empty line is the header. A header missing required tokens
/// is reported once but does not stop row parsing. Line numbers refer to the
/// physical lines of `text`, starting at 1.
pub fn parse_table<S: TableSchema>(text: &str, delimiter: char) -> ParseOutput<S::Record> {
    let mut out = ParseOutput::default();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let Some((_, header_line)) = lines.next() else {
        out.errors.push(ImportIssue::structural("file is empty"));
        return out;
    };

    let missing = missing_header_tokens(header_line, S::required_header());
    if !missing.is_empty() {
        out.errors.push(ImportIssue::structural(format!(
            "header is missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut data_lines = 0;
    for (line_no, line) in lines {
        data_lines += 1;
        let row = split_row(line, line_no, delimiter, S::COLUMNS);
        match S::build(&row, &mut out.warnings) {
            Ok(record) => out.rows.push(record),
            Err(reason) => out.errors.push(ImportIssue::rejected(line_no, reason)),
        }
    }

    if data_lines == 0 {
        out.warnings
            .push(ImportIssue::structural("no data rows after the header"));
    }

    tracing::debug!(
        rows = out.rows.len(),
        errors = out.errors.len(),
        warnings = out.warnings.len(),
        "parsed upload"
    );

    out
}

/// Split a line positionally into at most `columns` trimmed fields.
fn split_row(line: &str, line_no: usize, delimiter: char, columns: usize) -> RawRow {
    RawRow {
        line: line_no,
        fields: line
            .splitn(columns.max(1), delimiter)
            .map(|f| f.trim().to_string())
            .collect(),
    }
}

/// Field at `idx`, or "" if the row is shorter.
pub(crate) fn field(row: &RawRow, idx: usize) -> &str {
    row.fields.get(idx).map(|s| s.as_str()).unwrap_or("")
}

/// Presence and length check for a required text field.
pub(crate) fn required_text(value: &str, name: &str, max: usize) -> Result<String, String> {
    if value.is_empty() {
        return Err(format!("missing {name}"));
    }
    if !validate::within_length(value, max) {
        return Err(format!("{name} exceeds {max} characters"));
    }
    Ok(value.to_string())
}
