use roster_core::import::MemoryCatalog;
use roster_core::matching::{auto_accept_all, LinkDecision, MatchSuggestion};
use roster_core::model::UnlinkedEntity;
use roster_core::settings::schema::ImportSettings;
use serde::Serialize;
use std::path::PathBuf;

use crate::output;

#[derive(Serialize)]
struct MatchReport {
    normalizer_version: &'static str,
    suggestions: Vec<MatchSuggestion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<LinkDecision>,
}

pub fn run(
    unlinked_file: PathBuf,
    catalog_file: PathBuf,
    auto_accept: bool,
    output_format: &str,
    settings: &ImportSettings,
) -> Result<(), roster_core::error::RosterError> {
    let unlinked: Vec<UnlinkedEntity> = serde_json::from_slice(&std::fs::read(&unlinked_file)?)?;
    let catalog = MemoryCatalog::load(&catalog_file)?;

    let suggestions = roster_core::suggest(&unlinked, catalog.entries());

    let links = if auto_accept && settings.auto_accept_high {
        auto_accept_all(&suggestions)
    } else {
        if auto_accept {
            tracing::warn!(settings = %settings.name, "auto-accept disabled by settings");
        }
        Vec::new()
    };

    let report = MatchReport {
        normalizer_version: roster_core::NORMALIZER_VERSION,
        suggestions,
        links,
    };

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_suggestions(&report.suggestions, &report.links),
    }

    Ok(())
}
