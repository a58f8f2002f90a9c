//! Match and stage data structures.
//!
//! A `Match` is owned by the external ingestion layer; everything in this
//! crate treats it as part of an immutable snapshot. `score`, `winner` and
//! `decided_by` are only meaningful once `status` is `FINISHED`, and
//! `winner`/`decided_by` never apply to group-stage matches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::team::TeamSlot;

/// Tournament phases, in playing order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Stage {
    #[serde(rename = "GROUP")]
    Group,
    #[serde(rename = "R32")]
    RoundOf32,
    #[serde(rename = "R16")]
    RoundOf16,
    #[serde(rename = "QF")]
    QuarterFinal,
    #[serde(rename = "SF")]
    SemiFinal,
    #[serde(rename = "THIRD")]
    ThirdPlace,
    #[serde(rename = "FINAL")]
    Final,
}

impl Stage {
    /// Knockout stages in resolution order. Third place and the final both
    /// draw from the semifinals.
    pub const KNOCKOUT: [Stage; 6] = [
        Stage::RoundOf32,
        Stage::RoundOf16,
        Stage::QuarterFinal,
        Stage::SemiFinal,
        Stage::ThirdPlace,
        Stage::Final,
    ];

    pub fn is_knockout(self) -> bool {
        self != Stage::Group
    }

    /// The stage whose winners (or, for third place, losers) feed this one.
    pub fn feeder(self) -> Option<Stage> {
        match self {
            Stage::Group | Stage::RoundOf32 => None,
            Stage::RoundOf16 => Some(Stage::RoundOf32),
            Stage::QuarterFinal => Some(Stage::RoundOf16),
            Stage::SemiFinal => Some(Stage::QuarterFinal),
            Stage::ThirdPlace | Stage::Final => Some(Stage::SemiFinal),
        }
    }

    /// Stable short code, also used as composite map key segment.
    pub fn code(self) -> &'static str {
        match self {
            Stage::Group => "GROUP",
            Stage::RoundOf32 => "R32",
            Stage::RoundOf16 => "R16",
            Stage::QuarterFinal => "QF",
            Stage::SemiFinal => "SF",
            Stage::ThirdPlace => "THIRD",
            Stage::Final => "FINAL",
        }
    }

    pub fn from_code(code: &str) -> Option<Stage> {
        match code {
            "GROUP" => Some(Stage::Group),
            "R32" => Some(Stage::RoundOf32),
            "R16" => Some(Stage::RoundOf16),
            "QF" => Some(Stage::QuarterFinal),
            "SF" => Some(Stage::SemiFinal),
            "THIRD" => Some(Stage::ThirdPlace),
            "FINAL" => Some(Stage::Final),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "SCHEDULED")]
    Scheduled,
    #[serde(rename = "IN_PLAY")]
    InPlay,
    #[serde(rename = "FINISHED")]
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    /// Outcome from the home side's perspective.
    pub fn outcome(&self) -> Outcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Match outcome seen from the home side. Always derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "HOME")]
    Home,
    #[serde(rename = "AWAY")]
    Away,
}

/// How a drawn knockout match was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecidedBy {
    #[serde(rename = "REGULATION")]
    Regulation,
    #[serde(rename = "EXTRA_TIME")]
    ExtraTime,
    #[serde(rename = "PENALTIES")]
    Penalties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub stage: Stage,
    /// Group id ("A".."L"); group-stage matches only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub kickoff_time: DateTime<Utc>,
    pub status: MatchStatus,
    pub home_team: TeamSlot,
    pub away_team: TeamSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<DecidedBy>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// The recorded score, but only once the match is finished.
    pub fn finished_score(&self) -> Option<Score> {
        if self.is_finished() {
            self.score
        } else {
            None
        }
    }

    /// The recorded winner, only meaningful for finished knockout matches.
    pub fn finished_winner(&self) -> Option<Winner> {
        if self.is_finished() && self.stage.is_knockout() {
            self.winner
        } else {
            None
        }
    }

    /// Participant slot of the recorded winner, unresolved while the match
    /// has no usable result.
    pub fn winner_slot(&self) -> TeamSlot {
        match self.finished_winner() {
            Some(Winner::Home) => self.home_team.clone(),
            Some(Winner::Away) => self.away_team.clone(),
            None => TeamSlot::Unresolved,
        }
    }

    /// Participant slot of the recorded loser (third-place feed).
    pub fn loser_slot(&self) -> TeamSlot {
        match self.finished_winner() {
            Some(Winner::Home) => self.away_team.clone(),
            Some(Winner::Away) => self.home_team.clone(),
            None => TeamSlot::Unresolved,
        }
    }
}
