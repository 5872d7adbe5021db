use super::header::HeaderToken;
use super::{field, required_text, TableSchema};
use crate::import::outcome::ImportIssue;
use crate::model::{ParsedCourseRecord, RawRow, MAX_CODE_LEN, MAX_TITLE_LEN};

/// Course bulk format: `code;title`. The title takes every trailing column,
/// so titles may contain the delimiter.
pub struct CourseSchema;

const HEADER: &[HeaderToken] = &[
    HeaderToken {
        label: "code",
        aliases: &["code", "sigle"],
    },
    HeaderToken {
        label: "title",
        aliases: &["title", "titre", "intitul", "name", "nom"],
    },
];

impl TableSchema for CourseSchema {
    type Record = ParsedCourseRecord;

    const COLUMNS: usize = 2;

    fn required_header() -> &'static [HeaderToken] {
        HEADER
    }

    fn build(row: &RawRow, _warnings: &mut Vec<ImportIssue>) -> Result<ParsedCourseRecord, String> {
        let code = required_text(field(row, 0), "code", MAX_CODE_LEN)?;
        let full_title = required_text(field(row, 1), "title", MAX_TITLE_LEN)?;
        Ok(ParsedCourseRecord { code, full_title })
    }
}
