//! # pool_core - Prediction Pool Engine
//!
//! Standings, qualification, bracket progression, pick scoring, prediction
//! merging and leaderboard aggregation for a private tournament prediction
//! pool (round-robin group stage followed by single elimination).
//!
//! ## Design
//! - Pure, synchronous computation over immutable input snapshots
//! - Everything is derived state, recomputed wholesale on every run
//! - No I/O: snapshots come from and go back to the host application

pub mod api;
pub mod bracket;
pub mod error;
pub mod leaderboard;
pub mod merge;
pub mod models;
pub mod qualification;
pub mod scoring;
pub mod standings;

// Re-export the JSON API surface
pub use api::{
    compute_leaderboard_json, resolve_bracket_json, BracketRequest, BracketResponse,
    LeaderboardRequest, LeaderboardResponse, SCHEMA_VERSION,
};
pub use error::{PoolError, Result};

// Re-export the core pipeline types
pub use leaderboard::{aggregate, Aggregation};
pub use merge::{merge_bracket, merge_picks, MemoryStore, PredictionStore};
pub use models::{
    BracketPrediction, LeaderboardEntry, LeaderboardSnapshot, Match, MatchStatus,
    MatchesSnapshot, Member, Pick, PicksDocument, ScoringConfig, Stage, StagePoints,
    Team, TeamSlot, Winner,
};
pub use qualification::Qualification;
pub use scoring::{score_pick, PickScore};
pub use standings::{GroupStandingRow, GroupStandings, GroupTable};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Snapshot → standings → qualification → bracket wiring, small scale:
    /// four-team groups cannot determine qualification, so the knockout
    /// matches keep unresolved slots.
    #[test]
    fn test_pipeline_defers_bracket_until_determined() {
        let matches = vec![Match {
            id: "g1".into(),
            stage: Stage::Group,
            group: Some("A".into()),
            kickoff_time: Utc.with_ymd_and_hms(2026, 6, 11, 18, 0, 0).unwrap(),
            status: MatchStatus::Finished,
            home_team: TeamSlot::known("MEX", "Mexico"),
            away_team: TeamSlot::known("CAN", "Canada"),
            score: Some(models::Score::new(1, 0)),
            winner: None,
            decided_by: None,
        }];

        let table = standings::calculate(&matches);
        let qualification = qualification::resolve(&table, None);
        assert_eq!(qualification, Qualification::Undetermined);

        let resolved = bracket::resolve(&matches, &qualification);
        assert_eq!(resolved, matches);
    }
}
