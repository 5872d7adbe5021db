use crate::error::RosterError;
use crate::import::catalog::{Catalog, CatalogError};
use crate::import::outcome::{ImportIssue, ImportOutcome};
use crate::import::record::ImportRecord;
use crate::model::CatalogEntry;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPhase {
    Idle,
    Validating,
    Reconciling,
    Completed,
}

/// One progress event, emitted after each handed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

/// Progress callback. An `Err` (or a panic) is logged and otherwise ignored.
pub type ProgressFn<'a> = Box<dyn FnMut(Progress) -> Result<(), String> + 'a>;

/// Cooperative stop request, honored between rows.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What to do with one row, decided from the catalog lookup.
#[derive(Debug)]
enum Reconciliation {
    Create,
    Update(CatalogEntry),
}

/// What happened to one row.
#[derive(Debug)]
enum RowOutcome {
    Created(CatalogEntry),
    Updated(CatalogEntry),
    Failed(String),
}

/// Sequential create-or-update of parsed rows against a catalog.
///
/// Rows are handled strictly in input order, one catalog call at a time, so
/// a write for row N is visible to the lookup for row N+1.
pub struct Importer<'a> {
    phase: ImportPhase,
    on_progress: Option<ProgressFn<'a>>,
    stop: Option<StopFlag>,
}

impl Default for Importer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Importer<'a> {
    pub fn new() -> Self {
        Self {
            phase: ImportPhase::Idle,
            on_progress: None,
            stop: None,
        }
    }

    pub fn with_progress(mut self, f: impl FnMut(Progress) -> Result<(), String> + 'a) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn with_stop_flag(mut self, stop: StopFlag) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Current phase. After a fatal error this is the phase the run stopped in.
    pub fn phase(&self) -> ImportPhase {
        self.phase
    }

    /// Import `rows` into `catalog`.
    ///
    /// Per-row catalog rejections are collected in the outcome. Only
    /// `CatalogError::Unavailable` aborts the run.
    pub fn run<R, C>(&mut self, rows: &[R], catalog: &mut C) -> Result<ImportOutcome, RosterError>
    where
        R: ImportRecord,
        C: Catalog + ?Sized,
    {
        let total = rows.len();
        let mut outcome = ImportOutcome::default();

        self.enter(ImportPhase::Validating);
        let verdicts: Vec<Result<(), String>> = rows.iter().map(|r| r.revalidate()).collect();

        self.enter(ImportPhase::Reconciling);
        for (idx, (row, verdict)) in rows.iter().zip(verdicts).enumerate() {
            if self.stop_requested() {
                tracing::info!(done = idx, total, "import stopped between rows");
                outcome.stopped_early = true;
                break;
            }

            let code = row.code();
            match verdict {
                Err(reason) => {
                    tracing::debug!(code, %reason, "row failed re-validation");
                    outcome.errors.push(ImportIssue::rejected_key(code, reason));
                }
                Ok(()) => match reconcile_row(row, catalog)? {
                    RowOutcome::Created(entry) => {
                        tracing::debug!(code, id = %entry.id, "created");
                        outcome.created_count += 1;
                    }
                    RowOutcome::Updated(entry) => {
                        tracing::debug!(code, id = %entry.id, "updated");
                        outcome.updated_count += 1;
                    }
                    RowOutcome::Failed(reason) => {
                        tracing::warn!(code, %reason, "catalog rejected row");
                        outcome.errors.push(ImportIssue::persistence(code, reason));
                    }
                },
            }

            self.report(Progress {
                done: idx + 1,
                total,
            });
        }

        self.enter(ImportPhase::Completed);
        tracing::info!(
            created = outcome.created_count,
            updated = outcome.updated_count,
            errors = outcome.errors.len(),
            "import completed"
        );
        Ok(outcome)
    }

    fn enter(&mut self, phase: ImportPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "import phase");
        self.phase = phase;
    }

    fn stop_requested(&self) -> bool {
        self.stop.as_ref().is_some_and(|s| s.is_stop_requested())
    }

    fn report(&mut self, progress: Progress) {
        let Some(cb) = self.on_progress.as_mut() else {
            return;
        };
        match catch_unwind(AssertUnwindSafe(|| cb(progress))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, done = progress.done, "progress callback failed"),
            Err(_) => tracing::warn!(done = progress.done, "progress callback panicked"),
        }
    }
}

/// Look up, decide, and write one row.
fn reconcile_row<R, C>(row: &R, catalog: &mut C) -> Result<RowOutcome, RosterError>
where
    R: ImportRecord,
    C: Catalog + ?Sized,
{
    let decision = match catalog.get_by_key(row.code()) {
        Ok(Some(existing)) => Reconciliation::Update(existing),
        Ok(None) => Reconciliation::Create,
        Err(e) => return settle(e),
    };

    let written = match decision {
        Reconciliation::Create => catalog
            .create(row.code(), row.create_fields())
            .map(RowOutcome::Created),
        Reconciliation::Update(existing) => catalog
            .update(&existing.id, row.authoritative_fields())
            .map(RowOutcome::Updated),
    };

    match written {
        Ok(outcome) => Ok(outcome),
        Err(e) => settle(e),
    }
}

/// Turn a catalog failure into a per-row failure, or a fatal error if the
/// catalog is gone.
fn settle(err: CatalogError) -> Result<RowOutcome, RosterError> {
    match err {
        CatalogError::Rejected(reason) => Ok(RowOutcome::Failed(reason)),
        CatalogError::Unavailable(reason) => Err(RosterError::CatalogUnavailable(reason)),
    }
}

/// Import without progress reporting.
pub fn import_records<R, C>(rows: &[R], catalog: &mut C) -> Result<ImportOutcome, RosterError>
where
    R: ImportRecord,
    C: Catalog + ?Sized,
{
    Importer::new().run(rows, catalog)
}
