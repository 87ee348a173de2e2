//! Data models for the storage layer

use crate::cli::types::{FieldId, LeagueDate, LeagueTime, MatchId, OfficialId, PlayerId, TeamId};
use serde::{Deserialize, Serialize};

/// Most officials that can be assigned to one match
pub const MAX_OFFICIALS_PER_MATCH: u32 = 4;

/// A venue. Name is unique across the league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// `None` until the field has been saved
    pub id: Option<FieldId>,
    pub name: String,
    pub address: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, address: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            address,
        }
    }
}

/// A roster entity with zero or one home field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Option<TeamId>,
    pub name: String,
    pub field_id: Option<FieldId>,
}

impl Team {
    pub fn new(name: impl Into<String>, field_id: Option<FieldId>) -> Self {
        Self {
            id: None,
            name: name.into(),
            field_id,
        }
    }
}

/// A player and, when they are on a roster, their current membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<PlayerId>,
    pub first_name: String,
    pub last_name: String,
    pub team_id: Option<TeamId>,
    pub number: Option<u32>,
    pub start_date: Option<LeagueDate>,
}

impl Player {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            team_id: None,
            number: None,
            start_date: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One stint of a player on a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub number: u32,
    pub join_date: LeagueDate,
    pub leave_date: Option<LeagueDate>,
}

/// A scheduled game between two distinct teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Option<MatchId>,
    pub local_team_id: TeamId,
    pub visitor_team_id: TeamId,
    pub field_id: FieldId,
    pub date: LeagueDate,
    pub time: LeagueTime,
    pub local_score: u32,
    pub visitor_score: u32,
    pub result_recorded: bool,
}

impl Match {
    pub fn new(
        local_team_id: TeamId,
        visitor_team_id: TeamId,
        field_id: FieldId,
        date: LeagueDate,
        time: LeagueTime,
    ) -> Self {
        Self {
            id: None,
            local_team_id,
            visitor_team_id,
            field_id,
            date,
            time,
            local_score: 0,
            visitor_score: 0,
            result_recorded: false,
        }
    }
}

/// A referee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Official {
    pub id: Option<OfficialId>,
    pub first_name: String,
    pub last_name: String,
}

impl Official {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Match joined with display names, as shown by the result reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: MatchId,
    pub date: LeagueDate,
    pub time: LeagueTime,
    pub local_team: String,
    pub visitor_team: String,
    pub field: String,
    pub local_score: u32,
    pub visitor_score: u32,
    pub result_recorded: bool,
    pub officials: Vec<String>,
}

/// Season record of one team over matches with a recorded result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team: String,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub runs_for: u64,
    pub runs_against: u64,
}
