use thiserror::Error;

use crate::models::Stage;

#[derive(Error, Debug)]
pub enum PoolError {
    /// A stage has matches but no scoring table entry. Scoring must fail
    /// loudly here instead of silently awarding zero points.
    #[error("no scoring configuration for stage {}", .stage.code())]
    ConfigurationMissing { stage: Stage },

    #[error("unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PoolError>;
