use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength of a suggested link, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    None,
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceTier::High => write!(f, "high"),
            ConfidenceTier::Medium => write!(f, "medium"),
            ConfidenceTier::Low => write!(f, "low"),
            ConfidenceTier::None => write!(f, "none"),
        }
    }
}

/// Index of the first catalog code accepted by a tier, in iteration order.
pub type Matcher = fn(key: &str, codes: &[String]) -> Option<usize>;

/// Tiers tried in order; the first hit wins.
pub const TIERS: &[(ConfidenceTier, Matcher)] = &[
    (ConfidenceTier::High, match_exact),
    (ConfidenceTier::Medium, match_prefix),
    (ConfidenceTier::Low, match_fragment),
];

/// Number of leading characters shared for a medium-tier match.
pub const PREFIX_LEN: usize = 4;

/// Number of leading key characters searched for in a low-tier match.
pub const FRAGMENT_LEN: usize = 3;

pub fn match_exact(key: &str, codes: &[String]) -> Option<usize> {
    if key.is_empty() {
        return None;
    }
    codes.iter().position(|c| c == key)
}

/// Catalog code starts with the first four characters of the key. Keys
/// shorter than four characters never match here.
pub fn match_prefix(key: &str, codes: &[String]) -> Option<usize> {
    if key.chars().count() < PREFIX_LEN {
        return None;
    }
    let prefix: String = key.chars().take(PREFIX_LEN).collect();
    codes.iter().position(|c| c.starts_with(&prefix))
}

/// Catalog code contains the first three characters of the key, ignoring case.
pub fn match_fragment(key: &str, codes: &[String]) -> Option<usize> {
    if key.is_empty() {
        return None;
    }
    let fragment: String = key.chars().take(FRAGMENT_LEN).collect::<String>().to_lowercase();
    codes
        .iter()
        .position(|c| c.to_lowercase().contains(&fragment))
}
