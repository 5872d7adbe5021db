use roster_core::import::{Importer, MemoryCatalog};
use roster_core::model::UploadKind;
use roster_core::settings::schema::ImportSettings;
use std::path::PathBuf;

use super::read_upload;
use crate::output;

pub fn run(
    kind: UploadKind,
    input_file: PathBuf,
    catalog_file: PathBuf,
    output_format: &str,
    settings: &ImportSettings,
) -> Result<(), roster_core::error::RosterError> {
    let text = read_upload(&input_file, kind, settings)?;
    let mut catalog = MemoryCatalog::load(&catalog_file)?;

    let mut importer = Importer::new().with_progress(|p| {
        if p.done % 100 == 0 || p.done == p.total {
            tracing::info!(done = p.done, total = p.total, "import progress");
        }
        Ok(())
    });

    let outcome = match kind {
        UploadKind::Course => roster_core::import_courses_text(
            &text,
            settings.delimiter,
            &mut catalog,
            &mut importer,
        )?,
        UploadKind::Exam => {
            roster_core::import_exams_text(&text, settings.delimiter, &mut catalog, &mut importer)?
        }
    };

    catalog.save(&catalog_file)?;

    match output_format {
        "json" => output::json::print(&outcome)?,
        _ => output::table::print_outcome(&outcome, settings.display_limit),
    }

    Ok(())
}
