//! Type-safe wrappers for league identifiers and schedule values.

pub mod ids;
pub mod time;


pub use ids::{FieldId, MatchId, OfficialId, PlayerId, TeamId};
pub use time::{LeagueDate, LeagueTime};
