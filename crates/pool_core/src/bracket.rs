//! Knockout bracket progression.
//!
//! Fills knockout match participants round over round: round of 32 from the
//! qualifier list, later rounds from feeder winners, third place from the
//! semifinal losers. Within a stage, matches follow the externally supplied
//! ordering of kickoff time then match id; this engine never invents bracket
//! seeding.
//!
//! The whole pass is a pure recomputation over the snapshot: the input list
//! is cloned, participants are (re)derived, and the integrity guard heals
//! any match that carries a result ahead of participant resolution.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{Match, MatchStatus, Stage, TeamSlot};
use crate::qualification::Qualification;

/// Recompute knockout participants for the whole snapshot. Group matches
/// pass through untouched; the input order is preserved.
pub fn resolve(matches: &[Match], qualification: &Qualification) -> Vec<Match> {
    let mut matches = matches.to_vec();
    let names = team_names(&matches);

    for stage in Stage::KNOCKOUT {
        let slots = stage_indices(&matches, stage);

        match stage {
            Stage::RoundOf32 => {
                if let Some(qualifiers) = qualification.qualifiers() {
                    for (i, &idx) in slots.iter().enumerate() {
                        matches[idx].home_team = qualifier_slot(qualifiers, 2 * i, &names);
                        matches[idx].away_team = qualifier_slot(qualifiers, 2 * i + 1, &names);
                    }
                }
                // Undetermined qualification leaves the snapshot's round of
                // 32 participants as delivered.
            }
            Stage::ThirdPlace | Stage::Final => {
                let semis = stage_indices(&matches, Stage::SemiFinal);
                // A snapshot without semifinals leaves these as delivered,
                // like undetermined qualification does for the round of 32.
                if !semis.is_empty() {
                    let feed = |i: usize| -> TeamSlot {
                        match semis.get(i) {
                            Some(&j) if stage == Stage::ThirdPlace => matches[j].loser_slot(),
                            Some(&j) => matches[j].winner_slot(),
                            None => TeamSlot::Unresolved,
                        }
                    };
                    let (home, away) = (feed(0), feed(1));
                    if let Some(&idx) = slots.first() {
                        matches[idx].home_team = home;
                        matches[idx].away_team = away;
                    }
                }
            }
            _ => {
                let feeders = stage_indices(
                    &matches,
                    stage.feeder().unwrap_or(Stage::RoundOf32),
                );
                if feeders.is_empty() {
                    // Feeder stage absent from the snapshot: pass through.
                } else {
                    let pairs: Vec<(TeamSlot, TeamSlot)> = (0..slots.len())
                        .map(|i| {
                            let feed = |k: usize| {
                                feeders
                                    .get(k)
                                    .map(|&j| matches[j].winner_slot())
                                    .unwrap_or(TeamSlot::Unresolved)
                            };
                            (feed(2 * i), feed(2 * i + 1))
                        })
                        .collect();
                    for (i, &idx) in slots.iter().enumerate() {
                        let (home, away) = pairs[i].clone();
                        matches[idx].home_team = home;
                        matches[idx].away_team = away;
                    }
                }
            }
        }

        for &idx in &slots {
            enforce_integrity(&mut matches[idx]);
        }
    }

    matches
}

/// Stage matches in bracket order: kickoff time, then match id.
fn stage_indices(matches: &[Match], stage: Stage) -> Vec<usize> {
    let mut indices: Vec<usize> = matches
        .iter()
        .enumerate()
        .filter(|(_, m)| m.stage == stage)
        .map(|(i, _)| i)
        .collect();
    indices.sort_by(|&a, &b| {
        matches[a]
            .kickoff_time
            .cmp(&matches[b].kickoff_time)
            .then_with(|| matches[a].id.cmp(&matches[b].id))
    });
    indices
}

fn team_names(matches: &[Match]) -> HashMap<String, String> {
    let mut names = HashMap::new();
    for m in matches {
        for slot in [&m.home_team, &m.away_team] {
            if let Some(team) = slot.team() {
                names.insert(team.code.clone(), team.name.clone());
            }
        }
    }
    names
}

fn qualifier_slot(
    qualifiers: &[String],
    index: usize,
    names: &HashMap<String, String>,
) -> TeamSlot {
    match qualifiers.get(index) {
        Some(code) => {
            let name = names.get(code).cloned().unwrap_or_else(|| code.clone());
            TeamSlot::known(code.clone(), name)
        }
        None => TeamSlot::Unresolved,
    }
}

/// Results can never be attached ahead of participant resolution: a match
/// with an unresolved side is forced back to SCHEDULED with its result
/// cleared. While IN_PLAY a live score may show, but winner and decided-by
/// stay suppressed until FINISHED.
fn enforce_integrity(m: &mut Match) {
    let unresolved = !m.home_team.is_resolved() || !m.away_team.is_resolved();
    let has_result = m.score.is_some() || m.winner.is_some() || m.decided_by.is_some();

    if unresolved && (m.status != MatchStatus::Scheduled || has_result) {
        warn!(
            match_id = %m.id,
            stage = m.stage.code(),
            "result recorded ahead of participant resolution, resetting match"
        );
        m.status = MatchStatus::Scheduled;
        m.score = None;
        m.winner = None;
        m.decided_by = None;
    }

    if m.status == MatchStatus::InPlay {
        m.winner = None;
        m.decided_by = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Score, Winner};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn kickoff(offset_hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 28, 16, 0, 0).unwrap() + Duration::hours(offset_hours)
    }

    fn knockout_match(id: &str, stage: Stage, offset_hours: i64) -> Match {
        Match {
            id: id.into(),
            stage,
            group: None,
            kickoff_time: kickoff(offset_hours),
            status: MatchStatus::Scheduled,
            home_team: TeamSlot::Unresolved,
            away_team: TeamSlot::Unresolved,
            score: None,
            winner: None,
            decided_by: None,
        }
    }

    fn finish(m: &mut Match, home: &str, away: &str, score: (u8, u8), winner: Winner) {
        m.home_team = TeamSlot::known(home, home);
        m.away_team = TeamSlot::known(away, away);
        m.status = MatchStatus::Finished;
        m.score = Some(Score::new(score.0, score.1));
        m.winner = Some(winner);
    }

    fn qualifiers(n: usize) -> Qualification {
        Qualification::Determined((0..n).map(|i| format!("T{i:02}")).collect())
    }

    #[test]
    fn test_r32_filled_from_qualifier_pairs() {
        let matches = vec![
            knockout_match("r32-b", Stage::RoundOf32, 1),
            knockout_match("r32-a", Stage::RoundOf32, 0),
        ];
        let resolved = resolve(&matches, &qualifiers(32));
        // r32-a kicks off first: takes qualifiers 0 and 1.
        let a = resolved.iter().find(|m| m.id == "r32-a").unwrap();
        assert_eq!(a.home_team.code(), Some("T00"));
        assert_eq!(a.away_team.code(), Some("T01"));
        let b = resolved.iter().find(|m| m.id == "r32-b").unwrap();
        assert_eq!(b.home_team.code(), Some("T02"));
        assert_eq!(b.away_team.code(), Some("T03"));
    }

    #[test]
    fn test_r16_gated_on_both_feeders_finished() {
        let mut r32_a = knockout_match("r32-a", Stage::RoundOf32, 0);
        let r32_b = knockout_match("r32-b", Stage::RoundOf32, 1);
        let r16 = knockout_match("r16-a", Stage::RoundOf16, 48);
        finish(&mut r32_a, "BRA", "SUI", (2, 0), Winner::Home);

        // Second feeder unplayed: both slots must stay unresolved... the
        // home side resolves, the away side does not.
        let resolved = resolve(
            &[r32_a.clone(), r32_b.clone(), r16.clone()],
            &Qualification::Undetermined,
        );
        let out = resolved.iter().find(|m| m.id == "r16-a").unwrap();
        assert_eq!(out.home_team.code(), Some("BRA"));
        assert_eq!(out.away_team, TeamSlot::Unresolved);

        // Feeder finished but with no recorded winner: still unresolved.
        let mut r32_b_no_winner = r32_b.clone();
        finish(&mut r32_b_no_winner, "GER", "JPN", (1, 1), Winner::Away);
        r32_b_no_winner.winner = None;
        let resolved = resolve(
            &[r32_a.clone(), r32_b_no_winner, r16.clone()],
            &Qualification::Undetermined,
        );
        let out = resolved.iter().find(|m| m.id == "r16-a").unwrap();
        assert_eq!(out.away_team, TeamSlot::Unresolved);

        let mut r32_b_done = r32_b;
        finish(&mut r32_b_done, "GER", "JPN", (1, 2), Winner::Away);
        let resolved = resolve(&[r32_a, r32_b_done, r16], &Qualification::Undetermined);
        let out = resolved.iter().find(|m| m.id == "r16-a").unwrap();
        assert_eq!(out.home_team.code(), Some("BRA"));
        assert_eq!(out.away_team.code(), Some("JPN"));
    }

    #[test]
    fn test_third_place_takes_semifinal_losers() {
        let mut sf1 = knockout_match("sf-1", Stage::SemiFinal, 0);
        let mut sf2 = knockout_match("sf-2", Stage::SemiFinal, 4);
        finish(&mut sf1, "ARG", "CRO", (3, 0), Winner::Home);
        finish(&mut sf2, "FRA", "MAR", (2, 0), Winner::Home);
        let third = knockout_match("third", Stage::ThirdPlace, 100);
        let fin = knockout_match("final", Stage::Final, 120);

        let resolved = resolve(&[sf1, sf2, third, fin], &Qualification::Undetermined);
        let third = resolved.iter().find(|m| m.id == "third").unwrap();
        assert_eq!(third.home_team.code(), Some("CRO"));
        assert_eq!(third.away_team.code(), Some("MAR"));
        let fin = resolved.iter().find(|m| m.id == "final").unwrap();
        assert_eq!(fin.home_team.code(), Some("ARG"));
        assert_eq!(fin.away_team.code(), Some("FRA"));
    }

    #[test]
    fn test_integrity_guard_resets_premature_results() {
        let mut r16 = knockout_match("r16-a", Stage::RoundOf16, 0);
        // A result recorded while no feeder resolved the participants.
        r16.status = MatchStatus::Finished;
        r16.score = Some(Score::new(2, 1));
        r16.winner = Some(Winner::Home);

        let resolved = resolve(&[r16], &Qualification::Undetermined);
        let out = &resolved[0];
        assert_eq!(out.status, MatchStatus::Scheduled);
        assert_eq!(out.score, None);
        assert_eq!(out.winner, None);
        assert_eq!(out.decided_by, None);
    }

    #[test]
    fn test_in_play_suppresses_winner_and_decided_by() {
        let mut sf1 = knockout_match("sf-1", Stage::SemiFinal, 0);
        let mut sf2 = knockout_match("sf-2", Stage::SemiFinal, 4);
        finish(&mut sf1, "ESP", "POR", (2, 1), Winner::Home);
        finish(&mut sf2, "ENG", "WAL", (1, 0), Winner::Home);

        let mut m = knockout_match("f", Stage::Final, 100);
        m.status = MatchStatus::InPlay;
        m.score = Some(Score::new(1, 0));
        m.winner = Some(Winner::Home);

        let resolved = resolve(&[sf1, sf2, m], &Qualification::Undetermined);
        let out = resolved.iter().find(|m| m.id == "f").unwrap();
        assert_eq!(out.home_team.code(), Some("ESP"));
        assert_eq!(out.away_team.code(), Some("ENG"));
        assert_eq!(out.status, MatchStatus::InPlay);
        assert_eq!(out.score, Some(Score::new(1, 0))); // live score stays visible
        assert_eq!(out.winner, None);
        assert_eq!(out.decided_by, None);
    }

    #[test]
    fn test_group_matches_pass_through() {
        let mut group = knockout_match("g1", Stage::Group, 0);
        group.group = Some("A".into());
        finish(&mut group, "QAT", "ECU", (0, 2), Winner::Away);
        group.winner = None; // group matches never carry winners

        let resolved = resolve(&[group.clone()], &qualifiers(32));
        assert_eq!(resolved[0], group);
    }
}
