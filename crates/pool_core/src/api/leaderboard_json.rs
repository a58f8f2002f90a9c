//! Leaderboard computation over JSON snapshots.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::leaderboard::aggregate;
use crate::merge::merge_picks;
use crate::models::{
    LeaderboardSnapshot, MatchesSnapshot, Member, PicksDocument, ScoringConfig,
};

use super::{check_schema_version, SCHEMA_VERSION};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRequest {
    pub schema_version: u8,
    pub matches: MatchesSnapshot,
    /// Authoritative per-user pick documents.
    pub picks: Vec<PicksDocument>,
    /// Locally cached override documents, merged per (user, match) key.
    #[serde(default)]
    pub pick_overrides: Vec<PicksDocument>,
    pub scoring: ScoringConfig,
    pub members: Vec<Member>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub schema_version: u8,
    pub leaderboard: LeaderboardSnapshot,
    /// Picks whose owner matched no member; observable, not an error.
    pub dropped_picks: usize,
}

/// Parse a leaderboard request document, run merge and aggregation, and
/// return the response document.
pub fn compute_leaderboard_json(request_json: &str) -> Result<String> {
    let request: LeaderboardRequest = serde_json::from_str(request_json)?;
    check_schema_version(request.schema_version)?;

    let baseline = PicksDocument::flatten(&request.picks);
    let overrides = PicksDocument::flatten(&request.pick_overrides);
    let merged = merge_picks(&baseline, &overrides);

    let aggregation = aggregate(
        &request.members,
        &request.matches.matches,
        &merged,
        &request.scoring,
        request.matches.last_updated,
    )?;

    let response = LeaderboardResponse {
        schema_version: SCHEMA_VERSION,
        leaderboard: aggregation.snapshot,
        dropped_picks: aggregation.dropped_picks,
    };
    Ok(serde_json::to_string_pretty(&response)?)
}
