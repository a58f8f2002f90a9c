//! Pick scoring against a finished match.
//!
//! Three independent buckets, computed separately and summed, never capped
//! or mutually exclusive: a correctly predicted 1-1 knockout draw decided in
//! extra time earns exact, result and (with a matching `advances`) the
//! knockout bonus all at once.

use crate::models::{Match, Pick, StagePoints};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickScore {
    pub exact: u32,
    pub result: u32,
    pub knockout: u32,
}

impl PickScore {
    pub const ZERO: PickScore = PickScore { exact: 0, result: 0, knockout: 0 };

    pub fn total(&self) -> u32 {
        self.exact + self.result + self.knockout
    }
}

/// Score one pick against one match under a stage's point table.
///
/// Preconditions: the match is FINISHED with a recorded score and the pick
/// is complete for the stage. Anything else scores zero; the aggregator
/// additionally excludes such picks from the member's counts.
pub fn score_pick(m: &Match, pick: &Pick, points: &StagePoints) -> PickScore {
    let Some(actual) = m.finished_score() else {
        return PickScore::ZERO;
    };
    if !pick.is_complete(m.stage) {
        return PickScore::ZERO;
    }
    // is_complete guarantees both predicted scores are present
    let Some(predicted) = pick.predicted_score() else {
        return PickScore::ZERO;
    };

    let mut score = PickScore::ZERO;

    let home_hit = predicted.home == actual.home;
    let away_hit = predicted.away == actual.away;
    if home_hit && away_hit {
        score.exact = points.exact_score_both;
    } else if home_hit || away_hit {
        score.exact = points.exact_score_one;
    }

    // Outcomes are always derived from scores; stored outcome fields on old
    // documents are ignored.
    if predicted.outcome() == actual.outcome() {
        score.result = points.result;
    }

    if m.stage.is_knockout() {
        if let (Some(actual_winner), Some(bonus)) = (m.winner, points.knockout_winner) {
            if pick.predicted_winner() == Some(actual_winner) {
                score.knockout = bonus;
            }
        }
    }

    score
}
