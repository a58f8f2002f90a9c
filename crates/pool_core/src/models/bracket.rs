//! Per-user bracket predictions.
//!
//! The source documents used deeply nested optional maps
//! (`stage → matchId → winner`). Here knockout picks live in a flat sparse
//! map keyed by a composite `(stage, match id)` slot: a key is either present
//! with a winner or absent, nothing in between.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::matches::{Stage, Winner};

pub type GroupId = String;
pub type MatchId = String;

/// Composite key for a knockout prediction. Serialized as `"R16:m42"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KnockoutSlot {
    pub stage: Stage,
    pub match_id: MatchId,
}

impl KnockoutSlot {
    pub fn new(stage: Stage, match_id: impl Into<MatchId>) -> Self {
        Self { stage, match_id: match_id.into() }
    }
}

impl fmt::Display for KnockoutSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stage.code(), self.match_id)
    }
}

impl FromStr for KnockoutSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stage, match_id) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid knockout slot key: {s}"))?;
        let stage = Stage::from_code(stage)
            .ok_or_else(|| format!("unknown stage code: {stage}"))?;
        Ok(KnockoutSlot::new(stage, match_id))
    }
}

impl Serialize for KnockoutSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KnockoutSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Predicted group winner and runner-up. Either side may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPicks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<String>,
}

impl GroupPicks {
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketPrediction {
    #[serde(default)]
    pub groups: BTreeMap<GroupId, GroupPicks>,
    /// Up to 8 third-placed team codes, best first, no duplicates.
    #[serde(default)]
    pub best_thirds: Vec<String>,
    #[serde(default)]
    pub knockout: BTreeMap<KnockoutSlot, Winner>,
}

impl BracketPrediction {
    /// True when the document carries no prediction at all; an empty
    /// override never replaces a baseline.
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(GroupPicks::is_empty)
            && self.best_thirds.is_empty()
            && self.knockout.is_empty()
    }

    pub fn knockout_winner(&self, stage: Stage, match_id: &str) -> Option<Winner> {
        self.knockout
            .get(&KnockoutSlot::new(stage, match_id))
            .copied()
    }
}
