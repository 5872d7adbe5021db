use crate::matching::resolver::{MatchCandidate, MatchSuggestion};
use crate::matching::tiers::ConfidenceTier;
use serde::{Deserialize, Serialize};

/// How a link came to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confirmation {
    /// High-confidence candidate accepted without review.
    Auto,
    /// Chosen or confirmed by a person.
    Manual,
}

/// An accepted association between a source entity and a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDecision {
    pub entity_id: String,
    pub target_id: String,
    pub confirmation: Confirmation,
    /// Tier of the suggestion that was accepted, if the link came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<ConfidenceTier>,
}

impl LinkDecision {
    /// Accept a candidate automatically. Only high-confidence candidates qualify.
    pub fn auto_accept(entity_id: &str, candidate: &MatchCandidate) -> Option<LinkDecision> {
        if candidate.tier != ConfidenceTier::High {
            return None;
        }
        Some(LinkDecision {
            entity_id: entity_id.to_string(),
            target_id: candidate.target_id.clone(),
            confirmation: Confirmation::Auto,
            tier: Some(candidate.tier),
        })
    }

    /// Record a link picked by a person, with or without a suggestion behind it.
    pub fn manual(entity_id: &str, target_id: &str, tier: Option<ConfidenceTier>) -> LinkDecision {
        LinkDecision {
            entity_id: entity_id.to_string(),
            target_id: target_id.to_string(),
            confirmation: Confirmation::Manual,
            tier,
        }
    }
}

/// Auto-accept every high-confidence suggestion. The rest are left for review.
pub fn auto_accept_all(suggestions: &[MatchSuggestion]) -> Vec<LinkDecision> {
    suggestions
        .iter()
        .filter_map(|s| {
            s.candidate
                .as_ref()
                .and_then(|c| LinkDecision::auto_accept(&s.entity_id, c))
        })
        .collect()
}
