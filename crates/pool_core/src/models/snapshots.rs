//! Input artifact contracts.
//!
//! These arrive already parsed and validated from the external ingestion
//! layer; the engine never fetches or persists them itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matches::Match;
use super::pick::Pick;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesSnapshot {
    pub last_updated: DateTime<Utc>,
    pub matches: Vec<Match>,
}

/// One user's pick document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicksDocument {
    pub user_id: String,
    pub updated_at: DateTime<Utc>,
    pub picks: Vec<Pick>,
}

impl PicksDocument {
    /// Flatten documents into one pick list for merging and aggregation.
    pub fn flatten(documents: &[PicksDocument]) -> Vec<Pick> {
        documents.iter().flat_map(|d| d.picks.iter().cloned()).collect()
    }
}
