//! Group-stage standings, recomputed wholesale from the match snapshot.
//!
//! Standings are ephemeral derived state: nothing here is persisted, every
//! call rebuilds the table from finished group matches. Points are credited
//! from the recorded score (3 for a win, 1 each for a draw), never from an
//! external outcome field, and goal difference is always derived from the
//! accumulated goals.
//!
//! Known quirk, preserved from the original system: a team only gets a row
//! once it has appeared in at least one finished match, so a team whose
//! matches are all unplayed is invisible in "so far" standings instead of
//! showing zero stats.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{GroupId, Match, MatchStatus, Outcome, Stage};

/// One team's accumulated group record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStandingRow {
    pub team_code: String,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl GroupStandingRow {
    fn zeroed(team_code: impl Into<String>) -> Self {
        Self { team_code: team_code.into(), points: 0, goals_for: 0, goals_against: 0 }
    }

    /// Derived, never accumulated independently.
    pub fn goal_diff(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }
}

/// Ranked rows of one group plus its completion flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStandings {
    pub rows: Vec<GroupStandingRow>,
    /// Every group match of this group is FINISHED.
    pub complete: bool,
}

/// Standings for all groups present in the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTable {
    pub groups: BTreeMap<GroupId, GroupStandings>,
}

impl GroupTable {
    pub fn group(&self, group_id: &str) -> Option<&GroupStandings> {
        self.groups.get(group_id)
    }
}

/// Tie-break chain for standings rows: points desc, goal difference desc,
/// goals for desc, team code asc. Total order for any pair of rows.
pub fn cmp_rows(a: &GroupStandingRow, b: &GroupStandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_diff().cmp(&a.goal_diff()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team_code.cmp(&b.team_code))
}

/// Derive per-group standings from the full match list. Only finished
/// group-stage matches with a recorded score and two known teams count.
pub fn calculate(matches: &[Match]) -> GroupTable {
    let mut accumulators: BTreeMap<GroupId, BTreeMap<String, GroupStandingRow>> =
        BTreeMap::new();
    let mut finished_counts: BTreeMap<GroupId, (usize, usize)> = BTreeMap::new();

    for m in matches.iter().filter(|m| m.stage == Stage::Group) {
        let Some(group_id) = m.group.as_deref() else {
            continue;
        };
        let counts = finished_counts.entry(group_id.to_string()).or_default();
        counts.0 += 1;
        if m.status == MatchStatus::Finished {
            counts.1 += 1;
        }

        let (Some(score), Some(home), Some(away)) =
            (m.finished_score(), m.home_team.code(), m.away_team.code())
        else {
            continue;
        };

        let rows = accumulators.entry(group_id.to_string()).or_default();
        let (home_points, away_points) = match score.outcome() {
            Outcome::Win => (3, 0),
            Outcome::Loss => (0, 3),
            Outcome::Draw => (1, 1),
        };

        let home_row = rows
            .entry(home.to_string())
            .or_insert_with(|| GroupStandingRow::zeroed(home));
        home_row.points += home_points;
        home_row.goals_for += score.home as u32;
        home_row.goals_against += score.away as u32;

        let away_row = rows
            .entry(away.to_string())
            .or_insert_with(|| GroupStandingRow::zeroed(away));
        away_row.points += away_points;
        away_row.goals_for += score.away as u32;
        away_row.goals_against += score.home as u32;
    }

    let mut table = GroupTable::default();
    for (group_id, (total, finished)) in finished_counts {
        let mut rows: Vec<GroupStandingRow> = accumulators
            .remove(&group_id)
            .map(|rows| rows.into_values().collect())
            .unwrap_or_default();
        rows.sort_by(cmp_rows);
        table.groups.insert(
            group_id,
            GroupStandings { rows, complete: total > 0 && finished == total },
        );
    }
    table
}
