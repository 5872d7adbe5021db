use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Maximum length of a stored natural code, in characters.
pub const MAX_CODE_LEN: usize = 50;

/// Maximum length of a course title or exam name, in characters.
pub const MAX_TITLE_LEN: usize = 500;

/// Mutable catalog fields, keyed by field name.
pub type FieldMap = BTreeMap<String, serde_json::Value>;

/// Which bulk format an upload follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Course,
    Exam,
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadKind::Course => write!(f, "course"),
            UploadKind::Exam => write!(f, "exam"),
        }
    }
}

/// One line of a bulk upload after splitting on the delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source text.
    pub line: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCourseRecord {
    pub code: String,
    pub full_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExamRecord {
    pub code: String,
    pub name: String,
    /// Deduplicated, in upload order. Never empty.
    pub instructor_emails: Vec<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Catalog entity as seen through the catalog capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Opaque identifier owned by the catalog.
    pub id: String,
    /// Natural (business) key.
    pub code: String,
    #[serde(default)]
    pub fields: FieldMap,
}

impl CatalogEntry {
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }
}

/// An entity lacking a link to the course catalog, identified by a free-form code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlinkedEntity {
    pub id: String,
    pub raw_code: String,
}
