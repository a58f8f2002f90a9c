//! Batch runner for the prediction pool engine.
//!
//! The engine itself never touches storage; this crate is the external
//! update process that reads snapshot documents from disk, invokes the
//! engine and writes the result back.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use pool_core::{compute_leaderboard_json, resolve_bracket_json, LeaderboardResponse};

/// What a batch run produced, for operator output and logs.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub entries: usize,
    pub dropped_picks: usize,
    pub output_bytes: usize,
    pub created_at: DateTime<Utc>,
}

/// Read a leaderboard request document, compute the leaderboard and write
/// the response snapshot.
pub fn build_leaderboard(in_path: &Path, out_path: &Path) -> Result<Report> {
    let request = fs::read_to_string(in_path)
        .with_context(|| format!("reading request from {}", in_path.display()))?;

    let response_json = compute_leaderboard_json(&request)
        .context("computing leaderboard snapshot")?;
    let response: LeaderboardResponse = serde_json::from_str(&response_json)?;

    fs::write(out_path, &response_json)
        .with_context(|| format!("writing snapshot to {}", out_path.display()))?;

    Ok(Report {
        entries: response.leaderboard.entries.len(),
        dropped_picks: response.dropped_picks,
        output_bytes: response_json.len(),
        created_at: Utc::now(),
    })
}

/// Read a bracket request document, resolve qualification and knockout
/// participants and write the response snapshot.
pub fn build_bracket(in_path: &Path, out_path: &Path) -> Result<Report> {
    let request = fs::read_to_string(in_path)
        .with_context(|| format!("reading request from {}", in_path.display()))?;

    let response_json =
        resolve_bracket_json(&request).context("resolving bracket snapshot")?;
    let response: pool_core::BracketResponse = serde_json::from_str(&response_json)?;

    fs::write(out_path, &response_json)
        .with_context(|| format!("writing snapshot to {}", out_path.display()))?;

    Ok(Report {
        entries: response.matches.len(),
        dropped_picks: 0,
        output_bytes: response_json.len(),
        created_at: Utc::now(),
    })
}
