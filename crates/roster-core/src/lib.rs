pub mod error;
pub mod import;
pub mod matching;
pub mod model;
pub mod parsing;
pub mod settings;
pub mod upload;

use error::RosterError;
use import::{Catalog, ImportOutcome, ImportRecord, Importer};
use model::{ParsedCourseRecord, ParsedExamRecord};
use parsing::course::CourseSchema;
use parsing::exam::ExamSchema;
use parsing::{parse_table, ParseOutput, TableSchema};

pub use matching::{resolve, suggest};
pub use parsing::normalize::{canonical_form, normalize_code, NORMALIZER_VERSION};

/// Parse a course upload (`code;title`).
pub fn parse_courses(text: &str, delimiter: char) -> ParseOutput<ParsedCourseRecord> {
    parse_table::<CourseSchema>(text, delimiter)
}

/// Parse an exam upload (`code;name;emails;date;start;end`).
pub fn parse_exams(text: &str, delimiter: char) -> ParseOutput<ParsedExamRecord> {
    parse_table::<ExamSchema>(text, delimiter)
}

/// Parse a course upload and import the valid rows.
pub fn import_courses_text<C: Catalog + ?Sized>(
    text: &str,
    delimiter: char,
    catalog: &mut C,
    importer: &mut Importer<'_>,
) -> Result<ImportOutcome, RosterError> {
    import_text::<CourseSchema, C>(text, delimiter, catalog, importer)
}

/// Parse an exam upload and import the valid rows.
pub fn import_exams_text<C: Catalog + ?Sized>(
    text: &str,
    delimiter: char,
    catalog: &mut C,
    importer: &mut Importer<'_>,
) -> Result<ImportOutcome, RosterError> {
    import_text::<ExamSchema, C>(text, delimiter, catalog, importer)
}

/// Parse then reconcile. Parser-stage issues come before engine-stage ones in
/// the returned outcome.
fn import_text<S, C>(
    text: &str,
    delimiter: char,
    catalog: &mut C,
    importer: &mut Importer<'_>,
) -> Result<ImportOutcome, RosterError>
where
    S: TableSchema,
    S::Record: ImportRecord,
    C: Catalog + ?Sized,
{
    let parsed = parse_table::<S>(text, delimiter);
    let outcome = importer.run(&parsed.rows, catalog)?;
    Ok(outcome.with_parse_issues(parsed.errors, parsed.warnings))
}
