pub mod bracket;
pub mod leaderboard;
pub mod matches;
pub mod member;
pub mod pick;
pub mod scoring;
pub mod snapshots;
pub mod team;

pub use bracket::{BracketPrediction, GroupId, GroupPicks, KnockoutSlot, MatchId};
pub use leaderboard::{LeaderboardEntry, LeaderboardSnapshot};
pub use matches::{DecidedBy, Match, MatchStatus, Outcome, Score, Stage, Winner};
pub use member::Member;
pub use pick::Pick;
pub use scoring::{ScoringConfig, StagePoints};
pub use snapshots::{MatchesSnapshot, PicksDocument};
pub use team::{Team, TeamSlot, TBD_CODE};
