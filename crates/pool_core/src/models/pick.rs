//! Score predictions submitted by pool members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matches::{Outcome, Score, Stage, Winner};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub id: String,
    pub match_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u8>,
    /// Predicted side to advance; required for knockout draw predictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advances: Option<Winner>,
    /// Legacy explicit winner field from older documents. `advances` wins
    /// when both are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pick {
    pub fn predicted_score(&self) -> Option<Score> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some(Score::new(home, away)),
            _ => None,
        }
    }

    /// Predicted outcome, always derived from the predicted scores.
    pub fn predicted_outcome(&self) -> Option<Outcome> {
        self.predicted_score().map(|s| s.outcome())
    }

    /// A pick is complete iff both scores are present and, for a knockout
    /// draw prediction, `advances` is also set.
    pub fn is_complete(&self, stage: Stage) -> bool {
        let Some(score) = self.predicted_score() else {
            return false;
        };
        if stage.is_knockout() && score.outcome() == Outcome::Draw {
            return self.advances.is_some();
        }
        true
    }

    /// Predicted winner of a knockout match. Resolution priority:
    /// `advances`, then the legacy `winner` field, then the side implied by
    /// the predicted outcome (a draw prediction implies no winner).
    pub fn predicted_winner(&self) -> Option<Winner> {
        if let Some(advances) = self.advances {
            return Some(advances);
        }
        if let Some(winner) = self.winner {
            return Some(winner);
        }
        match self.predicted_outcome()? {
            Outcome::Win => Some(Winner::Home),
            Outcome::Loss => Some(Winner::Away),
            Outcome::Draw => None,
        }
    }
}
