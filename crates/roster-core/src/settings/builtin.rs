use crate::error::RosterError;
use crate::settings::schema::ImportSettings;

const DEFAULT_JSON: &str = include_str!("../../../../presets/default.json");

/// Built-in settings: `;` delimiter, 5 MiB course and 10 MiB exam ceilings.
pub fn default_settings() -> Result<ImportSettings, RosterError> {
    let settings: ImportSettings = serde_json::from_str(DEFAULT_JSON)?;
    Ok(settings)
}
