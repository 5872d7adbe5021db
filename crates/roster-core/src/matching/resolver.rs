use crate::matching::tiers::{ConfidenceTier, TIERS};
use crate::model::{CatalogEntry, UnlinkedEntity};
use crate::parsing::normalize::{canonical_form, normalize_code};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub target_id: String,
    pub target_code: String,
    pub tier: ConfidenceTier,
}

/// Suggestion for one unlinked entity, in the order the entities were given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    pub entity_id: String,
    pub raw_code: String,
    pub canonical_code: String,
    pub candidate: Option<MatchCandidate>,
}

impl MatchSuggestion {
    pub fn tier(&self) -> ConfidenceTier {
        self.candidate
            .as_ref()
            .map(|c| c.tier)
            .unwrap_or(ConfidenceTier::None)
    }
}

/// Suggest a catalog entry for each unlinked entity.
///
/// The entity code is normalized; catalog codes are only trimmed, collapsed
/// and uppercased, so a catalog entry stored with a session suffix never
/// counts as an exact hit for the bare code. Within a tier the first entry
/// in `catalog` order wins, so callers wanting stable results across catalog
/// reloads must sort the catalog first. Nothing is written and no link is
/// created here.
pub fn suggest(unlinked: &[UnlinkedEntity], catalog: &[CatalogEntry]) -> Vec<MatchSuggestion> {
    let codes: Vec<String> = catalog.iter().map(|e| canonical_form(&e.code)).collect();

    let suggestions: Vec<MatchSuggestion> = unlinked
        .iter()
        .map(|entity| {
            let key = normalize_code(&entity.raw_code);
            let candidate = best_candidate(&key, &codes, catalog);
            MatchSuggestion {
                entity_id: entity.id.clone(),
                raw_code: entity.raw_code.clone(),
                canonical_code: key,
                candidate,
            }
        })
        .collect();

    tracing::debug!(
        entities = unlinked.len(),
        catalog = catalog.len(),
        matched = suggestions.iter().filter(|s| s.candidate.is_some()).count(),
        "resolved link suggestions"
    );

    suggestions
}

/// Map each entity id to its candidate, if any.
///
/// Entity ids are expected to be unique. When one repeats, the later entity
/// replaces the earlier one in the map and a warning is logged; use
/// [`suggest`] to keep every entity.
pub fn resolve(
    unlinked: &[UnlinkedEntity],
    catalog: &[CatalogEntry],
) -> BTreeMap<String, Option<MatchCandidate>> {
    let mut out = BTreeMap::new();
    for s in suggest(unlinked, catalog) {
        if out.insert(s.entity_id.clone(), s.candidate).is_some() {
            tracing::warn!(entity_id = %s.entity_id, "duplicate entity id, keeping the last one");
        }
    }
    out
}

fn best_candidate(key: &str, codes: &[String], catalog: &[CatalogEntry]) -> Option<MatchCandidate> {
    TIERS.iter().find_map(|(tier, matcher)| {
        matcher(key, codes).map(|idx| MatchCandidate {
            target_id: catalog[idx].id.clone(),
            target_code: catalog[idx].code.clone(),
            tier: *tier,
        })
    })
}
