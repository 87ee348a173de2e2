//! ID types for league entities.
//!
//! Every entity table uses an integer primary key handed out by the
//! sequence allocator. Each key gets its own wrapper so a team id can never
//! be passed where a player id is expected.

use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = LeagueError;

            fn from_str(s: &str) -> Result<Self> {
                s.parse::<i64>()
                    .ok()
                    .filter(|id| *id > 0)
                    .map(Self)
                    .ok_or_else(|| LeagueError::invalid($label, s, "expected a positive integer"))
            }
        }
    };
}

entity_id!(
    /// Type-safe wrapper for team IDs.
    ///
    /// ```rust
    /// use baseball_league::TeamId;
    ///
    /// let id = TeamId::new(7);
    /// assert_eq!(id.as_i64(), 7);
    /// assert_eq!(id.to_string(), "7");
    /// ```
    TeamId,
    "TeamId"
);

entity_id!(
    /// Type-safe wrapper for field IDs
    FieldId,
    "FieldId"
);

entity_id!(
    /// Type-safe wrapper for player IDs
    PlayerId,
    "PlayerId"
);

entity_id!(MatchId, "MatchId");

entity_id!(OfficialId, "OfficialId");
