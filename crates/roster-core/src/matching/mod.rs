pub mod link;
pub mod resolver;
pub mod tiers;

pub use link::{auto_accept_all, Confirmation, LinkDecision};
pub use resolver::{resolve, suggest, MatchCandidate, MatchSuggestion};
pub use tiers::ConfidenceTier;
