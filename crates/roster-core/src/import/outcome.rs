use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a problem recorded during parsing or import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Whole-file problem (empty input, header tokens missing).
    Structural,
    /// Required field missing or malformed; the row was dropped.
    RowRejected,
    /// Optional field malformed; the row was kept with the field cleared.
    RowDegraded,
    /// The catalog refused a create or update for one row.
    PersistenceFailure,
}

/// Where an issue points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueLocation {
    File,
    /// 1-based line in the uploaded text.
    Line(usize),
    /// Natural code of the record.
    Key(String),
}

impl fmt::Display for IssueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueLocation::File => write!(f, "file"),
            IssueLocation::Line(n) => write!(f, "line {n}"),
            IssueLocation::Key(code) => write!(f, "{code}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportIssue {
    pub kind: IssueKind,
    pub location: IssueLocation,
    pub message: String,
}

impl ImportIssue {
    pub fn structural(message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::Structural,
            location: IssueLocation::File,
            message: message.into(),
        }
    }

    pub fn rejected(line: usize, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::RowRejected,
            location: IssueLocation::Line(line),
            message: message.into(),
        }
    }

    pub fn rejected_key(code: &str, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::RowRejected,
            location: IssueLocation::Key(code.to_string()),
            message: message.into(),
        }
    }

    pub fn degraded(line: usize, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::RowDegraded,
            location: IssueLocation::Line(line),
            message: message.into(),
        }
    }

    pub fn persistence(code: &str, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::PersistenceFailure,
            location: IssueLocation::Key(code.to_string()),
            message: message.into(),
        }
    }

    /// Line number, for issues tied to a line of the upload.
    pub fn line(&self) -> Option<usize> {
        match self.location {
            IssueLocation::Line(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for ImportIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Result of one import call. Not persisted by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub created_count: usize,
    pub updated_count: usize,
    /// Parser-stage errors first, then engine-stage errors.
    pub errors: Vec<ImportIssue>,
    pub warnings: Vec<ImportIssue>,
    /// Set when a stop was requested between rows.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stopped_early: bool,
}

impl ImportOutcome {
    /// Rows that reached the catalog successfully.
    pub fn processed_rows(&self) -> usize {
        self.created_count + self.updated_count
    }

    pub fn persistence_failures(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| e.kind == IssueKind::PersistenceFailure)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Some rows landed and some did not. A valid end state.
    pub fn is_partial_success(&self) -> bool {
        self.processed_rows() > 0 && !self.errors.is_empty()
    }

    /// Nothing landed and something went wrong.
    pub fn is_total_failure(&self) -> bool {
        self.processed_rows() == 0 && !self.errors.is_empty()
    }

    /// Prepend parser-stage issues so they precede engine-stage ones.
    pub fn with_parse_issues(mut self, errors: Vec<ImportIssue>, warnings: Vec<ImportIssue>) -> Self {
        let mut all_errors = errors;
        all_errors.append(&mut self.errors);
        self.errors = all_errors;

        let mut all_warnings = warnings;
        all_warnings.append(&mut self.warnings);
        self.warnings = all_warnings;
        self
    }
}

/// First `limit` issues plus how many were left out, for rendering long lists.
pub fn truncated(issues: &[ImportIssue], limit: usize) -> (&[ImportIssue], usize) {
    if issues.len() <= limit {
        (issues, 0)
    } else {
        (&issues[..limit], issues.len() - limit)
    }
}
