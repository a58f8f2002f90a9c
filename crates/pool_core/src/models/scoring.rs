//! Per-stage scoring point tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};

use super::matches::Stage;

/// Point values for one stage. The group stage carries no
/// `knockout_winner` bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePoints {
    pub exact_score_both: u32,
    pub exact_score_one: u32,
    pub result: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knockout_winner: Option<u32>,
}

/// Stage → points table. A stage with matches but no entry is a broken
/// configuration, never a silent zero score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringConfig {
    pub stages: BTreeMap<Stage, StagePoints>,
}

impl ScoringConfig {
    pub fn for_stage(&self, stage: Stage) -> Result<&StagePoints> {
        self.stages
            .get(&stage)
            .ok_or(PoolError::ConfigurationMissing { stage })
    }
}
