//! Knockout qualification: group winners, runners-up and the best
//! third-placed teams.
//!
//! Output is the ordered qualifier list consumed by bracket assignment:
//! winner and runner-up per group (groups in id order), then the 8 best
//! thirds. With twelve groups that is the full set of 32 knockout slots.
//! When the snapshot cannot determine the set yet, the result is explicitly
//! `Undetermined` and callers must defer bracket assignment rather than
//! guess.

use std::collections::BTreeSet;

use tracing::debug;

use crate::standings::{cmp_rows, GroupTable};

pub const BEST_THIRD_SLOTS: usize = 8;

/// Resolution result. `Determined` carries qualifier team codes in bracket
/// slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualification {
    Determined(Vec<String>),
    Undetermined,
}

impl Qualification {
    pub fn qualifiers(&self) -> Option<&[String]> {
        match self {
            Qualification::Determined(codes) => Some(codes),
            Qualification::Undetermined => None,
        }
    }
}

/// Derive the qualifier list from standings.
///
/// Top-two selection needs every group complete; the output has a slot for
/// each group's winner and runner-up and cannot be partially filled. An
/// externally supplied `best_third_override` is used verbatim in place of
/// the best-third derivation (simulation and admin flows), skipping its
/// completeness checks.
pub fn resolve(table: &GroupTable, best_third_override: Option<&[String]>) -> Qualification {
    if table.groups.is_empty() {
        return Qualification::Undetermined;
    }

    let mut qualifiers = Vec::with_capacity(table.groups.len() * 2 + BEST_THIRD_SLOTS);
    let mut top_two: BTreeSet<&str> = BTreeSet::new();

    for (group_id, standings) in &table.groups {
        if !standings.complete || standings.rows.len() < 2 {
            debug!(group = %group_id, "group not complete, qualification undetermined");
            return Qualification::Undetermined;
        }
        for row in &standings.rows[..2] {
            top_two.insert(&row.team_code);
            qualifiers.push(row.team_code.clone());
        }
    }

    let thirds = match best_third_override {
        Some(codes) => codes.to_vec(),
        None => match derive_best_thirds(table, &top_two) {
            Some(codes) => codes,
            None => return Qualification::Undetermined,
        },
    };

    qualifiers.extend(thirds);
    Qualification::Determined(qualifiers)
}

/// Rank third-placed rows of complete groups with the standings tie-break
/// chain applied across groups, keeping the best eight. Teams already
/// qualified top-two are filtered defensively even though that should be
/// structurally impossible.
fn derive_best_thirds(table: &GroupTable, top_two: &BTreeSet<&str>) -> Option<Vec<String>> {
    let mut third_rows: Vec<_> = table
        .groups
        .values()
        .filter(|standings| standings.complete)
        .filter_map(|standings| standings.rows.get(2))
        .filter(|row| !top_two.contains(row.team_code.as_str()))
        .collect();

    if third_rows.len() < BEST_THIRD_SLOTS {
        debug!(
            eligible = third_rows.len(),
            "not enough third-placed rows, qualification undetermined"
        );
        return None;
    }

    third_rows.sort_by(|a, b| cmp_rows(a, b));
    Some(
        third_rows[..BEST_THIRD_SLOTS]
            .iter()
            .map(|row| row.team_code.clone())
            .collect(),
    )
}
