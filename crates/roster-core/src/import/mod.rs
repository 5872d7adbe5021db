pub mod catalog;
pub mod engine;
pub mod memory;
pub mod outcome;
pub mod record;

pub use catalog::{Catalog, CatalogError};
pub use engine::{import_records, ImportPhase, Importer, Progress, StopFlag};
pub use memory::MemoryCatalog;
pub use outcome::{ImportIssue, ImportOutcome, IssueKind, IssueLocation};
pub use record::ImportRecord;
