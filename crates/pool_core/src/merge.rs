//! Reconciliation of baseline prediction records with locally cached
//! overrides.
//!
//! The original system read a browser-local key-value store from inside the
//! merge logic. Here the store is an injected capability ([`PredictionStore`])
//! and the merge functions themselves are pure: baseline in, override in,
//! merged value out.
//!
//! Two merge shapes exist. Bracket documents swap wholesale: a non-empty
//! override replaces the baseline document entirely, there is no field-level
//! merge. Pick collections merge per `(user id, match id)` key with
//! last-write-wins on `updated_at` — the only ordering rule in the whole
//! engine, and a value comparison, not a concurrency primitive.

use std::collections::BTreeMap;
use std::collections::HashMap;

use tracing::warn;

use crate::models::{BracketPrediction, Pick};

/// Key-value access to locally cached prediction documents. Implementations
/// wrap whatever storage the host application has; tests use [`MemoryStore`].
pub trait PredictionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store for tests and batch runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl PredictionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Store key for a user's cached bracket override.
pub fn bracket_key(user_id: &str) -> String {
    format!("bracket/{user_id}")
}

/// Store key for a user's cached pick override document.
pub fn picks_key(user_id: &str) -> String {
    format!("picks/{user_id}")
}

/// Load a user's cached bracket override. Unparseable cache entries are
/// dropped with a warning rather than poisoning the merge.
pub fn load_bracket_override(
    store: &dyn PredictionStore,
    user_id: &str,
) -> Option<BracketPrediction> {
    let raw = store.get(&bracket_key(user_id))?;
    match serde_json::from_str(&raw) {
        Ok(prediction) => Some(prediction),
        Err(err) => {
            warn!(user_id, %err, "discarding unparseable cached bracket override");
            None
        }
    }
}

/// Whole-record swap: a non-empty override replaces the baseline document,
/// an empty one leaves the baseline in use unchanged.
pub fn merge_bracket(
    baseline: &BracketPrediction,
    override_: Option<&BracketPrediction>,
) -> BracketPrediction {
    match override_ {
        Some(o) if !o.is_empty() => o.clone(),
        _ => baseline.clone(),
    }
}

/// Per-match merge of pick collections.
///
/// Override picks replace baseline picks keyed by `(user_id, match_id)`;
/// a user's baseline picks for other matches are preserved. Duplicate
/// records for the same key — within either input or across the two — are
/// resolved by `updated_at`, ties going to the override. Idempotent, and an
/// empty override returns the baseline as-is.
pub fn merge_picks(baseline: &[Pick], overrides: &[Pick]) -> Vec<Pick> {
    if overrides.is_empty() {
        return baseline.to_vec();
    }

    let mut merged: BTreeMap<(String, String), Pick> = BTreeMap::new();
    for pick in baseline {
        upsert(&mut merged, pick, false);
    }
    for pick in overrides {
        upsert(&mut merged, pick, true);
    }
    merged.into_values().collect()
}

fn upsert(merged: &mut BTreeMap<(String, String), Pick>, pick: &Pick, is_override: bool) {
    let key = (pick.user_id.clone(), pick.match_id.clone());
    match merged.get(&key) {
        Some(existing)
            if existing.updated_at > pick.updated_at
                || (existing.updated_at == pick.updated_at && !is_override) =>
        {
            // last-write-wins: the stored record is strictly newer, or an
            // equal-timestamp duplicate that the override may not displace
        }
        _ => {
            merged.insert(key, pick.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupPicks, KnockoutSlot, Stage, Winner};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, day, 12, 0, 0).unwrap()
    }

    fn pick(user: &str, match_id: &str, home: u8, updated: DateTime<Utc>) -> Pick {
        Pick {
            id: format!("{user}-{match_id}"),
            match_id: match_id.into(),
            user_id: user.into(),
            home_score: Some(home),
            away_score: Some(0),
            advances: None,
            winner: None,
            created_at: updated - Duration::days(1),
            updated_at: updated,
        }
    }

    #[test]
    fn test_empty_override_is_a_no_op() {
        let baseline = vec![pick("u1", "m1", 2, at(1)), pick("u1", "m2", 1, at(1))];
        let original = baseline.clone();
        let merged = merge_picks(&baseline, &[]);
        assert_eq!(merged, original);
        assert_eq!(baseline, original); // baseline untouched
    }

    #[test]
    fn test_override_replaces_matching_key_only() {
        let baseline = vec![pick("u1", "m1", 2, at(1)), pick("u1", "m2", 1, at(1))];
        let overrides = vec![pick("u1", "m1", 5, at(3))];
        let merged = merge_picks(&baseline, &overrides);

        assert_eq!(merged.len(), 2);
        let m1 = merged.iter().find(|p| p.match_id == "m1").unwrap();
        assert_eq!(m1.home_score, Some(5));
        let m2 = merged.iter().find(|p| p.match_id == "m2").unwrap();
        assert_eq!(m2.home_score, Some(1)); // other matches preserved
    }

    #[test]
    fn test_merge_is_idempotent() {
        let baseline = vec![pick("u1", "m1", 2, at(1)), pick("u2", "m1", 0, at(2))];
        let overrides = vec![pick("u1", "m1", 4, at(5)), pick("u1", "m3", 1, at(5))];
        let once = merge_picks(&baseline, &overrides);
        let twice = merge_picks(&once, &overrides);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_stale_override_loses_to_newer_baseline() {
        let baseline = vec![pick("u1", "m1", 2, at(9))];
        let overrides = vec![pick("u1", "m1", 7, at(3))];
        let merged = merge_picks(&baseline, &overrides);
        assert_eq!(merged[0].home_score, Some(2));
    }

    #[test]
    fn test_duplicate_baseline_records_resolved_by_timestamp() {
        let baseline = vec![pick("u1", "m1", 1, at(2)), pick("u1", "m1", 3, at(6))];
        let merged = merge_picks(&baseline, &[pick("u2", "m9", 0, at(1))]);
        let u1 = merged.iter().find(|p| p.user_id == "u1").unwrap();
        assert_eq!(u1.home_score, Some(3));
    }

    #[test]
    fn test_bracket_swap_is_whole_record() {
        let mut baseline = BracketPrediction::default();
        baseline
            .groups
            .insert("A".into(), GroupPicks { first: Some("ARG".into()), second: None });
        baseline.best_thirds = vec!["POL".into()];

        let mut override_ = BracketPrediction::default();
        override_
            .knockout
            .insert(KnockoutSlot::new(Stage::Final, "f1"), Winner::Home);

        let merged = merge_bracket(&baseline, Some(&override_));
        // No field-level merge: the baseline's groups are gone.
        assert_eq!(merged, override_);
    }

    #[test]
    fn test_empty_bracket_override_keeps_baseline() {
        let mut baseline = BracketPrediction::default();
        baseline.best_thirds = vec!["KOR".into()];

        let merged = merge_bracket(&baseline, Some(&BracketPrediction::default()));
        assert_eq!(merged, baseline);
        assert_eq!(merge_bracket(&baseline, None), baseline);
    }

    #[test]
    fn test_store_round_trip_and_bad_cache_entry() {
        let mut store = MemoryStore::default();
        let mut prediction = BracketPrediction::default();
        prediction.best_thirds = vec!["JPN".into()];
        store.set(
            &bracket_key("u1"),
            serde_json::to_string(&prediction).unwrap(),
        );
        store.set(&bracket_key("u2"), "{not json".into());

        assert_eq!(load_bracket_override(&store, "u1"), Some(prediction));
        assert_eq!(load_bracket_override(&store, "u2"), None);
        assert_eq!(load_bracket_override(&store, "u3"), None);
    }
}
