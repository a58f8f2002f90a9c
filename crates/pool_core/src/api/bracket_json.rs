//! Standings, qualification and bracket resolution over JSON snapshots.

use serde::{Deserialize, Serialize};

use crate::bracket;
use crate::error::Result;
use crate::models::{Match, MatchesSnapshot};
use crate::qualification::{self, Qualification};
use crate::standings;

use super::{check_schema_version, SCHEMA_VERSION};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketRequest {
    pub schema_version: u8,
    pub matches: MatchesSnapshot,
    /// Admin/simulation override for the best-third list, used verbatim.
    #[serde(default)]
    pub best_third_override: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketResponse {
    pub schema_version: u8,
    /// Ordered qualifier codes; absent while qualification is undetermined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifiers: Option<Vec<String>>,
    /// The full match list with knockout participants resolved.
    pub matches: Vec<Match>,
}

/// Derive standings, resolve qualification and propagate the knockout
/// bracket for a matches snapshot.
pub fn resolve_bracket_json(request_json: &str) -> Result<String> {
    let request: BracketRequest = serde_json::from_str(request_json)?;
    check_schema_version(request.schema_version)?;

    let table = standings::calculate(&request.matches.matches);
    let qualification =
        qualification::resolve(&table, request.best_third_override.as_deref());
    let matches = bracket::resolve(&request.matches.matches, &qualification);

    let response = BracketResponse {
        schema_version: SCHEMA_VERSION,
        qualifiers: match qualification {
            Qualification::Determined(codes) => Some(codes),
            Qualification::Undetermined => None,
        },
        matches,
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_undetermined_snapshot_returns_no_qualifiers() {
        let doc = json!({
            "schemaVersion": 1,
            "matches": {
                "lastUpdated": "2026-06-20T12:00:00Z",
                "matches": [
                    {
                        "id": "g1",
                        "stage": "GROUP",
                        "group": "A",
                        "kickoffTime": "2026-06-15T18:00:00Z",
                        "status": "FINISHED",
                        "homeTeam": {"code": "MEX", "name": "Mexico"},
                        "awayTeam": {"code": "CAN", "name": "Canada"},
                        "score": {"home": 2, "away": 1}
                    },
                    {
                        "id": "r32-1",
                        "stage": "R32",
                        "kickoffTime": "2026-06-28T18:00:00Z",
                        "status": "FINISHED",
                        "homeTeam": {"code": "TBD", "name": "TBD"},
                        "awayTeam": {"code": "TBD", "name": "TBD"},
                        "score": {"home": 1, "away": 0},
                        "winner": "HOME"
                    }
                ]
            }
        });
        let response_json = resolve_bracket_json(&doc.to_string()).unwrap();
        let response: BracketResponse = serde_json::from_str(&response_json).unwrap();

        assert_eq!(response.qualifiers, None);
        // The premature round-of-32 result was healed back to SCHEDULED.
        let r32 = response.matches.iter().find(|m| m.id == "r32-1").unwrap();
        assert_eq!(r32.score, None);
        assert_eq!(r32.winner, None);
    }
}
