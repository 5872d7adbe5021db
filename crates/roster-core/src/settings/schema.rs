use crate::model::UploadKind;
use crate::parsing::DEFAULT_DELIMITER;
use serde::{Deserialize, Serialize};

/// Tunables for uploads, parsing, and rendering of import reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    #[serde(default = "default_name")]
    pub name: String,
    /// Column delimiter for both bulk formats.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Size ceiling for course uploads, in bytes.
    pub max_course_bytes: u64,
    /// Size ceiling for exam uploads, in bytes.
    pub max_exam_bytes: u64,
    /// Accepted file extensions, lowercase, without the dot.
    #[serde(default)]
    pub allowed_extensions: Vec<String>,
    /// Whether high-confidence match suggestions may be accepted without review.
    #[serde(default)]
    pub auto_accept_high: bool,
    /// How many errors or warnings to show before truncating.
    pub display_limit: usize,
}

fn default_name() -> String {
    "custom".to_string()
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl ImportSettings {
    pub fn max_bytes(&self, kind: UploadKind) -> u64 {
        match kind {
            UploadKind::Course => self.max_course_bytes,
            UploadKind::Exam => self.max_exam_bytes,
        }
    }
}
