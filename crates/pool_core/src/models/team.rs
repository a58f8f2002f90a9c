//! Teams and bracket slot participants.
//!
//! A knockout slot may not know its team yet (feeder matches unplayed), so a
//! participant is a tagged variant rather than a magic team code. The wire
//! format keeps the reserved `"TBD"` code for compatibility with existing
//! snapshot documents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved code for an unresolved participant on the wire.
pub const TBD_CODE: &str = "TBD";

const TBD_NAME: &str = "To be determined";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub code: String,
    pub name: String,
}

impl Team {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: code.into(), name: name.into() }
    }
}

/// A match participant slot: either a known team or still to be determined.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamSlot {
    Known(Team),
    #[default]
    Unresolved,
}

impl TeamSlot {
    pub fn known(code: impl Into<String>, name: impl Into<String>) -> Self {
        TeamSlot::Known(Team::new(code, name))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, TeamSlot::Known(_))
    }

    /// Team code, if the slot is resolved.
    pub fn code(&self) -> Option<&str> {
        match self {
            TeamSlot::Known(team) => Some(&team.code),
            TeamSlot::Unresolved => None,
        }
    }

    pub fn team(&self) -> Option<&Team> {
        match self {
            TeamSlot::Known(team) => Some(team),
            TeamSlot::Unresolved => None,
        }
    }
}

impl Serialize for TeamSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TeamSlot::Known(team) => team.serialize(serializer),
            TeamSlot::Unresolved => {
                Team::new(TBD_CODE, TBD_NAME).serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for TeamSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let team = Team::deserialize(deserializer)?;
        if team.code == TBD_CODE {
            Ok(TeamSlot::Unresolved)
        } else {
            Ok(TeamSlot::Known(team))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_round_trip_keeps_sentinel_code() {
        let json = serde_json::to_string(&TeamSlot::Unresolved).unwrap();
        assert!(json.contains("\"TBD\""));

        let back: TeamSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TeamSlot::Unresolved);
    }

    #[test]
    fn test_known_team_round_trip() {
        let slot = TeamSlot::known("BRA", "Brazil");
        let json = serde_json::to_string(&slot).unwrap();
        let back: TeamSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
        assert_eq!(back.code(), Some("BRA"));
    }

    #[test]
    fn test_sentinel_code_deserializes_to_unresolved() {
        let back: TeamSlot =
            serde_json::from_str(r#"{"code":"TBD","name":"whatever"}"#).unwrap();
        assert!(!back.is_resolved());
    }
}
