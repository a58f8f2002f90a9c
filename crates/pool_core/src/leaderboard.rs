//! Leaderboard aggregation.
//!
//! Every run re-synthesizes the whole leaderboard from the merged pick list
//! and the match snapshot. Members start with zeroed buckets, so a member
//! with no scored picks still appears. Picks owned by an unknown member are
//! silently dropped from aggregation but counted for the invoking layer.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::Result;
use crate::models::{
    LeaderboardEntry, LeaderboardSnapshot, Match, Member, Pick, ScoringConfig,
};
use crate::scoring::score_pick;

/// Aggregation output: the ordered snapshot plus the number of picks that
/// were dropped for lacking a matching member.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub snapshot: LeaderboardSnapshot,
    pub dropped_picks: usize,
}

/// Build the ranked leaderboard from a snapshot.
///
/// Fails with `ConfigurationMissing` when a stage with finished matches has
/// no scoring table entry; everything else degrades per the error table
/// (incomplete picks excluded, unknown owners dropped and counted).
pub fn aggregate(
    members: &[Member],
    matches: &[Match],
    picks: &[Pick],
    config: &ScoringConfig,
    last_updated: DateTime<Utc>,
) -> Result<Aggregation> {
    // A stage with finished matches but no point table is a broken config;
    // fail before any partial aggregation.
    let finished_stages: BTreeSet<_> = matches
        .iter()
        .filter(|m| m.is_finished())
        .map(|m| m.stage)
        .collect();
    for stage in finished_stages {
        config.for_stage(stage)?;
    }

    let match_index: HashMap<&str, &Match> =
        matches.iter().map(|m| (m.id.as_str(), m)).collect();

    let mut entries: HashMap<&str, LeaderboardEntry> = members
        .iter()
        .map(|m| (m.id.as_str(), LeaderboardEntry::zeroed(m.clone())))
        .collect();

    let mut dropped_picks = 0usize;
    for pick in picks {
        let Some(entry) = entries.get_mut(pick.user_id.as_str()) else {
            debug!(user_id = %pick.user_id, pick_id = %pick.id, "pick owner unknown, dropping");
            dropped_picks += 1;
            continue;
        };

        entry.earliest_submission = Some(match entry.earliest_submission {
            Some(existing) => existing.min(pick.created_at),
            None => pick.created_at,
        });

        let Some(m) = match_index.get(pick.match_id.as_str()) else {
            continue;
        };
        if !m.is_finished() || !pick.is_complete(m.stage) {
            continue;
        }

        let points = config.for_stage(m.stage)?;
        let score = score_pick(m, pick, points);
        entry.exact_points += score.exact;
        entry.result_points += score.result;
        entry.knockout_points += score.knockout;
        entry.picks_count += 1;
        if pick.predicted_score() == m.finished_score() {
            entry.exact_count += 1;
        }
    }

    let mut entries: Vec<LeaderboardEntry> = entries
        .into_values()
        .map(|mut e| {
            e.total_points = e.exact_points + e.result_points + e.knockout_points;
            e
        })
        .collect();
    entries.sort_by(cmp_entries);

    Ok(Aggregation {
        snapshot: LeaderboardSnapshot { last_updated, entries },
        dropped_picks,
    })
}

/// Strict total ranking order: total desc, exact desc, result desc,
/// knockout desc, earliest submission asc (missing sorts last), member name
/// asc. Rank is the 1-based position under this order, never stored.
fn cmp_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| b.exact_points.cmp(&a.exact_points))
        .then_with(|| b.result_points.cmp(&a.result_points))
        .then_with(|| b.knockout_points.cmp(&a.knockout_points))
        .then_with(|| cmp_earliest(a.earliest_submission, b.earliest_submission))
        .then_with(|| a.member.name.cmp(&b.member.name))
}

/// Ascending with `None` as positive infinity.
fn cmp_earliest(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
