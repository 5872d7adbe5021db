use roster_core::model::UploadKind;
use roster_core::settings::schema::ImportSettings;
use std::path::PathBuf;

use super::read_upload;
use crate::output;

pub fn run(
    kind: UploadKind,
    input_file: PathBuf,
    output_format: &str,
    settings: &ImportSettings,
) -> Result<(), roster_core::error::RosterError> {
    let text = read_upload(&input_file, kind, settings)?;

    match kind {
        UploadKind::Course => {
            let parsed = roster_core::parse_courses(&text, settings.delimiter);
            match output_format {
                "json" => output::json::print(&parsed)?,
                _ => output::table::print_parsed_courses(&parsed, settings.display_limit),
            }
        }
        UploadKind::Exam => {
            let parsed = roster_core::parse_exams(&text, settings.delimiter);
            match output_format {
                "json" => output::json::print(&parsed)?,
                _ => output::table::print_parsed_exams(&parsed, settings.display_limit),
            }
        }
    }

    Ok(())
}
