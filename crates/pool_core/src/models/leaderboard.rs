//! Leaderboard output artifact.
//!
//! Entries are re-synthesized wholesale on every run, never patched
//! incrementally. `rank` is the 1-based position in the snapshot's order and
//! is intentionally not stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::member::Member;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub member: Member,
    pub total_points: u32,
    pub exact_points: u32,
    pub result_points: u32,
    pub knockout_points: u32,
    pub exact_count: u32,
    pub picks_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_submission: Option<DateTime<Utc>>,
}

impl LeaderboardEntry {
    pub fn zeroed(member: Member) -> Self {
        Self {
            member,
            total_points: 0,
            exact_points: 0,
            result_points: 0,
            knockout_points: 0,
            exact_count: 0,
            picks_count: 0,
            earliest_submission: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSnapshot {
    pub last_updated: DateTime<Utc>,
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardSnapshot {
    /// 1-based rank of a member in this snapshot, by position.
    pub fn rank_of(&self, member_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.member.id == member_id)
            .map(|i| i + 1)
    }
}
