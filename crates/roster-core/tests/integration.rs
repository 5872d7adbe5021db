//! Integration tests for the upload -> parse -> import -> match pipeline.
//!
//! Uses an in-test catalog that records every call, so these tests check the
//! order and shape of catalog traffic without any real storage.

use roster_core::error::RosterError;
use roster_core::import::{
    Catalog, CatalogError, ImportPhase, Importer, IssueKind, IssueLocation, MemoryCatalog,
};
use roster_core::matching::{auto_accept_all, ConfidenceTier};
use roster_core::model::{CatalogEntry, FieldMap, UnlinkedEntity, UploadKind};
use roster_core::settings::default_settings;
use roster_core::upload::check_upload;
use roster_core::{import_courses_text, import_exams_text, parse_exams, resolve, suggest};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Get(String),
    Create(String),
    Update(String),
}

struct RecordingCatalog {
    inner: MemoryCatalog,
    calls: Vec<Call>,
    refuse_create: Vec<String>,
}

impl RecordingCatalog {
    fn new() -> Self {
        Self {
            inner: MemoryCatalog::new(),
            calls: Vec::new(),
            refuse_create: Vec::new(),
        }
    }
}

impl Catalog for RecordingCatalog {
    fn get_by_key(&mut self, code: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        self.calls.push(Call::Get(code.to_string()));
        self.inner.get_by_key(code)
    }

    fn create(&mut self, code: &str, fields: FieldMap) -> Result<CatalogEntry, CatalogError> {
        self.calls.push(Call::Create(code.to_string()));
        if self.refuse_create.iter().any(|c| c == code) {
            return Err(CatalogError::Rejected("unique constraint failed".into()));
        }
        self.inner.create(code, fields)
    }

    fn update(&mut self, id: &str, fields: FieldMap) -> Result<CatalogEntry, CatalogError> {
        self.calls.push(Call::Update(id.to_string()));
        self.inner.update(id, fields)
    }
}

const EXAM_HEADER: &str = "Code Examen;Nom Examen;Enseignants";

// ---------------------------------------------------------------------------
// Parsing scenarios
// ---------------------------------------------------------------------------
#[test]
fn exam_row_with_two_instructors() {
    let out = parse_exams(&format!("{EXAM_HEADER}\nMATH101;Calculus I;a@x.be,b@x.be"), ';');

    assert!(out.errors.is_empty());
    assert!(out.warnings.is_empty());
    assert_eq!(out.rows.len(), 1);
    let r = &out.rows[0];
    assert_eq!(r.code, "MATH101");
    assert_eq!(r.name, "Calculus I");
    assert_eq!(r.instructor_emails, vec!["a@x.be", "b@x.be"]);
    assert!(r.date.is_none());
    assert!(r.start_time.is_none());
    assert!(r.end_time.is_none());
}

#[test]
fn wrong_date_separator_degrades_row() {
    let out = parse_exams(&format!("{EXAM_HEADER}\nMATH101;Calculus I;a@x.be;2025/01/15"), ';');

    assert_eq!(out.rows.len(), 1);
    assert!(out.rows[0].date.is_none());
    assert!(out.errors.is_empty());
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.warnings[0].kind, IssueKind::RowDegraded);
    assert_eq!(out.warnings[0].location, IssueLocation::Line(2));
    assert!(out.warnings[0].message.contains("2025/01/15"));
}

#[test]
fn missing_code_rejects_row() {
    let out = parse_exams(&format!("{EXAM_HEADER}\n;Calculus I;a@x.be"), ';');

    assert!(out.rows.is_empty());
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].to_string(), "line 2: missing code");
}

#[test]
fn empty_text_is_one_structural_error() {
    let out = parse_exams("", ';');

    assert!(out.rows.is_empty());
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].kind, IssueKind::Structural);
    assert_eq!(out.errors[0].message, "file is empty");
}

#[test]
fn bad_header_still_parses_rows() {
    let out = parse_exams("Sigle;Intitule\nMATH101;Calculus I;a@x.be", ';');

    assert_eq!(out.rows.len(), 1);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].kind, IssueKind::Structural);
    assert!(out.errors[0].message.contains("instructor"));
}

#[test]
fn line_numbers_count_blank_lines() {
    let out = parse_exams(&format!("{EXAM_HEADER}\n\nMATH101;;a@x.be\n"), ';');
    assert_eq!(out.errors[0].line(), Some(3));
}

// ---------------------------------------------------------------------------
// Import scenarios
// ---------------------------------------------------------------------------
#[test]
fn import_twice_creates_then_updates() {
    let text = format!("{EXAM_HEADER}\nMATH101;Calculus I;a@x.be");
    let mut catalog = RecordingCatalog::new();

    let first = import_exams_text(&text, ';', &mut catalog, &mut Importer::new()).unwrap();
    assert_eq!((first.created_count, first.updated_count), (1, 0));

    let second = import_exams_text(&text, ';', &mut catalog, &mut Importer::new()).unwrap();
    assert_eq!((second.created_count, second.updated_count), (0, 1));
    assert_eq!(catalog.inner.len(), 1);

    assert_eq!(
        catalog.calls,
        vec![
            Call::Get("MATH101".into()),
            Call::Create("MATH101".into()),
            Call::Get("MATH101".into()),
            Call::Update("e1".into()),
        ]
    );
}

#[test]
fn parser_issues_precede_engine_issues() {
    let text = "code;title\nA1;Algebra\n;No code\nB1;Biology\nC1;Chemistry";
    let mut catalog = RecordingCatalog::new();
    catalog.refuse_create.push("B1".into());

    let outcome = import_courses_text(text, ';', &mut catalog, &mut Importer::new()).unwrap();

    assert_eq!(outcome.created_count, 2);
    assert_eq!(outcome.errors.len(), 2);
    assert_eq!(outcome.errors[0].kind, IssueKind::RowRejected);
    assert_eq!(outcome.errors[0].line(), Some(3));
    assert_eq!(outcome.errors[1].kind, IssueKind::PersistenceFailure);
    assert_eq!(outcome.errors[1].location, IssueLocation::Key("B1".into()));
    assert!(outcome.is_partial_success());

    // created + updated + persistence failures = valid rows handed to the engine
    assert_eq!(
        outcome.created_count + outcome.updated_count + outcome.persistence_failures(),
        3
    );
}

#[test]
fn course_update_keeps_instructions() {
    let mut fields = FieldMap::new();
    fields.insert("title".into(), Value::from("Old title"));
    fields.insert("instructions".into(), Value::from("Open book"));
    let mut catalog = MemoryCatalog::from_entries(vec![CatalogEntry {
        id: "c1".into(),
        code: "LFSAB1101".into(),
        fields,
    }]);

    let outcome = import_courses_text(
        "code;title\nLFSAB1101;New title",
        ';',
        &mut catalog,
        &mut Importer::new(),
    )
    .unwrap();

    assert_eq!(outcome.updated_count, 1);
    let entry = &catalog.entries()[0];
    assert_eq!(entry.field_str("title"), Some("New title"));
    assert_eq!(entry.field_str("instructions"), Some("Open book"));
}

#[test]
fn exam_update_keeps_schedule_when_row_is_blank() {
    let mut catalog = MemoryCatalog::new();
    let full = format!("{EXAM_HEADER}\nMATH101;Calculus I;a@x.be;2025-01-15;09:00;12:00");
    let bare = format!("{EXAM_HEADER}\nMATH101;Calculus I (resit);b@x.be");

    import_exams_text(&full, ';', &mut catalog, &mut Importer::new()).unwrap();
    import_exams_text(&bare, ';', &mut catalog, &mut Importer::new()).unwrap();

    let entry = &catalog.entries()[0];
    assert_eq!(entry.field_str("name"), Some("Calculus I (resit)"));
    assert_eq!(entry.field_str("date"), Some("2025-01-15"));
    assert_eq!(entry.field_str("start_time"), Some("09:00"));
    assert_eq!(entry.fields["instructor_emails"], serde_json::json!(["b@x.be"]));
}

struct DownCatalog;

impl Catalog for DownCatalog {
    fn get_by_key(&mut self, _code: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".into()))
    }

    fn create(&mut self, _code: &str, _fields: FieldMap) -> Result<CatalogEntry, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".into()))
    }

    fn update(&mut self, _id: &str, _fields: FieldMap) -> Result<CatalogEntry, CatalogError> {
        Err(CatalogError::Unavailable("connection refused".into()))
    }
}

#[test]
fn unreachable_catalog_is_fatal() {
    let mut importer = Importer::new();
    let result = import_courses_text("code;title\nA1;Algebra", ';', &mut DownCatalog, &mut importer);

    assert!(matches!(result, Err(RosterError::CatalogUnavailable(_))));
    assert_eq!(importer.phase(), ImportPhase::Reconciling);
}

#[test]
fn progress_events_follow_rows() {
    let mut seen = Vec::new();
    {
        let mut importer = Importer::new().with_progress(|p| {
            seen.push((p.done, p.total));
            Ok(())
        });
        import_courses_text(
            "code;title\nA1;Algebra\nB1;Biology",
            ';',
            &mut MemoryCatalog::new(),
            &mut importer,
        )
        .unwrap();
    }
    assert_eq!(seen, vec![(1, 2), (2, 2)]);
}

// ---------------------------------------------------------------------------
// Upload checks
// ---------------------------------------------------------------------------
#[test]
fn zero_byte_upload_rejected_before_parsing() {
    let settings = default_settings().unwrap();
    let err = check_upload(b"", "exams.csv", UploadKind::Exam, &settings).unwrap_err();
    assert!(matches!(err, RosterError::UploadRejected(_)));
}

#[test]
fn checked_upload_feeds_parser() {
    let settings = default_settings().unwrap();
    let bytes = format!("\u{feff}{EXAM_HEADER}\nMATH101;Calculus I;a@x.be").into_bytes();
    let text = check_upload(&bytes, "exams.csv", UploadKind::Exam, &settings).unwrap();
    let out = parse_exams(text, settings.delimiter);
    assert!(out.errors.is_empty());
    assert_eq!(out.rows.len(), 1);
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------
fn entry(id: &str, code: &str) -> CatalogEntry {
    CatalogEntry {
        id: id.into(),
        code: code.into(),
        fields: FieldMap::new(),
    }
}

#[test]
fn session_suffix_still_matches_exactly() {
    let catalog = vec![entry("c1", "MATH1"), entry("c2", "MATH101")];
    let unlinked = vec![UnlinkedEntity {
        id: "exam-7".into(),
        raw_code: "MATH101-A".into(),
    }];

    let out = resolve(&unlinked, &catalog);
    let candidate = out["exam-7"].as_ref().unwrap();
    assert_eq!(candidate.target_id, "c2");
    assert_eq!(candidate.tier, ConfidenceTier::High);
}

#[test]
fn only_high_suggestions_auto_link() {
    let catalog = vec![entry("c1", "MATH101"), entry("c2", "PHYS200")];
    let unlinked = vec![
        UnlinkedEntity {
            id: "e1".into(),
            raw_code: "math101 s1".into(),
        },
        UnlinkedEntity {
            id: "e2".into(),
            raw_code: "PHYS999".into(),
        },
        UnlinkedEntity {
            id: "e3".into(),
            raw_code: "HIST100".into(),
        },
    ];

    let suggestions = suggest(&unlinked, &catalog);
    assert_eq!(suggestions[0].tier(), ConfidenceTier::High);
    assert_eq!(suggestions[1].tier(), ConfidenceTier::Medium);
    assert_eq!(suggestions[2].tier(), ConfidenceTier::None);

    let links = auto_accept_all(&suggestions);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].entity_id, "e1");
    assert_eq!(links[0].target_id, "c1");
}

#[test]
fn auto_link_targets_the_unsuffixed_catalog_entry() {
    let catalog = vec![entry("c1", "MATH101-B"), entry("c2", "MATH101")];
    let unlinked = vec![UnlinkedEntity {
        id: "e1".into(),
        raw_code: "MATH101".into(),
    }];

    let links = auto_accept_all(&suggest(&unlinked, &catalog));
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].target_id, "c2");
}
