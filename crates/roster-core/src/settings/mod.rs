pub mod builtin;
pub mod schema;

use crate::error::RosterError;
use schema::ImportSettings;
use std::path::Path;

pub use builtin::default_settings;

/// Load settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<ImportSettings, RosterError> {
    let content = std::fs::read_to_string(path).map_err(|e| RosterError::SettingsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let settings: ImportSettings =
        serde_json::from_str(&content).map_err(|e| RosterError::SettingsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Parse settings from a JSON string (no file path context).
pub fn parse_settings_str(json: &str) -> Result<ImportSettings, RosterError> {
    let settings: ImportSettings = serde_json::from_str(json).map_err(RosterError::Json)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Punctuation that occurs inside field values: email addresses and lists,
/// YYYY-MM-DD dates and HH:MM times.
const FIELD_PUNCTUATION: &[char] = &[',', '@', '"', ':', '-', '.', '/', '_', '+'];

/// Validate that settings are usable.
pub fn validate_settings(settings: &ImportSettings) -> Result<(), RosterError> {
    let d = settings.delimiter;
    if d.is_alphanumeric() || d.is_whitespace() || FIELD_PUNCTUATION.contains(&d) {
        return Err(RosterError::SettingsInvalid(format!(
            "delimiter '{}' would collide with field content",
            d.escape_default()
        )));
    }

    if settings.max_course_bytes == 0 || settings.max_exam_bytes == 0 {
        return Err(RosterError::SettingsInvalid(
            "size ceilings must be greater than zero".into(),
        ));
    }

    if settings.display_limit == 0 {
        return Err(RosterError::SettingsInvalid(
            "display_limit must be greater than zero".into(),
        ));
    }

    for ext in &settings.allowed_extensions {
        if ext.is_empty() || ext.starts_with('.') || ext.chars().any(|c| c.is_uppercase()) {
            return Err(RosterError::SettingsInvalid(format!(
                "extension '{}' must be lowercase and given without a dot",
                ext
            )));
        }
    }

    Ok(())
}
