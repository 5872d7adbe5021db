pub mod import;
pub mod matching;
pub mod parse;
pub mod settings;

use roster_core::error::RosterError;
use roster_core::settings::schema::ImportSettings;
use std::path::Path;

/// Settings from `--settings`, or the built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<ImportSettings, RosterError> {
    match path {
        Some(p) => roster_core::settings::load_settings(p),
        None => roster_core::settings::default_settings(),
    }
}

/// Read an upload from disk and run the pre-parse checks on it.
pub fn read_upload(
    path: &Path,
    kind: roster_core::model::UploadKind,
    settings: &ImportSettings,
) -> Result<String, RosterError> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = roster_core::upload::check_upload(&bytes, &name, kind, settings)?;
    Ok(text.to_string())
}
