//! Console commands: parsing, dispatch and the per-entity handlers.

pub mod dispatch;
pub mod matches;
pub mod officials;
pub mod parser;
pub mod players;
pub mod registry;
pub mod reports;
pub mod teams;

#[cfg(test)]
mod tests;

pub use dispatch::{AppContext, Console, Outcome};
pub use parser::{parse_line, tokenize};

use crate::{
    cli::types::{LeagueDate, LeagueTime},
    Result,
};
use serde::Serialize;
use std::{fmt, io::Write};

/// A parsed console command with its positional arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateTeam {
        team: String,
        field: Option<String>,
        address: Option<String>,
    },
    ListTeams,
    DeleteTeam {
        team: String,
    },
    CreatePlayer {
        last_name: String,
        first_name: String,
        roster: Option<RosterSpot>,
    },
    ListPlayersForTeam {
        team: Option<String>,
    },
    DeletePlayer {
        last_name: String,
        first_name: String,
    },
    CreateMatch {
        key: MatchKey,
    },
    CreateOfficial {
        last_name: String,
        first_name: String,
    },
    ListOfficials,
    AssignOfficialToMatch {
        key: MatchKey,
        last_name: String,
        first_name: String,
    },
    EnterMatchResult {
        key: MatchKey,
        local_score: u32,
        visitor_score: u32,
    },
    ListResultsByDate {
        from: Option<LeagueDate>,
    },
    ListResultsForTeam {
        team: Option<String>,
    },
    ListFields,
    ListStandings,
    Help,
    Quit,
}

/// Team, jersey number and start date given to `create-player`
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSpot {
    pub team: String,
    pub number: u32,
    pub start_date: Option<LeagueDate>,
}

/// How the operator names a match: date, time and both team names
#[derive(Debug, Clone, PartialEq)]
pub struct MatchKey {
    pub date: LeagueDate,
    pub time: LeagueTime,
    pub local_team: String,
    pub visitor_team: String,
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} vs {}",
            self.date, self.time, self.local_team, self.visitor_team
        )
    }
}

/// Pretty-print `value` as one JSON document
pub(crate) fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
