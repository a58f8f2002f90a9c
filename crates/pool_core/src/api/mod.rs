//! JSON snapshot API.
//!
//! String-in/string-out entry points for hosts that hand the engine its
//! snapshots as JSON documents (batch runner, embedding applications).

pub mod bracket_json;
pub mod leaderboard_json;

pub use bracket_json::{resolve_bracket_json, BracketRequest, BracketResponse};
pub use leaderboard_json::{
    compute_leaderboard_json, LeaderboardRequest, LeaderboardResponse,
};

/// Supported request schema version.
pub const SCHEMA_VERSION: u8 = 1;

pub(crate) fn check_schema_version(found: u8) -> crate::error::Result<()> {
    if found != SCHEMA_VERSION {
        return Err(crate::error::PoolError::SchemaVersion {
            found,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(())
}
