//! Error types for the baseball league CLI

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeagueError>;


#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    #[error("Missing parameter for {command}: {parameter}")]
    MissingParameter { command: String, parameter: String },

    #[error("Invalid value for {parameter}: '{value}' ({reason})")]
    InvalidArgument {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Too many parameters for {command} (expected at most {max})")]
    TooManyParameters { command: String, max: usize },

    #[error("Score cannot be negative: {value}")]
    NegativeScore { value: i64 },

    #[error("Team name already taken: {name}")]
    TeamNameTaken { name: String },

    #[error("Field name already taken: {name}")]
    FieldNameTaken { name: String },

    #[error("Player already exists: {first_name} {last_name}")]
    PlayerAlreadyExists {
        first_name: String,
        last_name: String,
    },

    #[error("Official already exists: {first_name} {last_name}")]
    OfficialAlreadyExists {
        first_name: String,
        last_name: String,
    },

    #[error("Match already exists: {description}")]
    MatchAlreadyExists { description: String },

    #[error("Official {official} is already assigned to this match")]
    OfficialAlreadyAssigned { official: String },

    #[error("Team not found: {name}")]
    TeamNotFound { name: String },

    #[error("Field not found: {name}")]
    FieldNotFound { name: String },

    #[error("Player not found: {first_name} {last_name}")]
    PlayerNotFound {
        first_name: String,
        last_name: String,
    },

    #[error("Official not found: {first_name} {last_name}")]
    OfficialNotFound {
        first_name: String,
        last_name: String,
    },

    #[error("Match not found: {description}")]
    MatchNotFound { description: String },

    #[error("Team {name} still has {players} active player(s)")]
    TeamNotEmpty { name: String, players: u32 },

    #[error("Team {name} is scheduled in {matches} match(es)")]
    TeamHasMatches { name: String, matches: u32 },

    #[error("Field {name} still hosts {matches} match(es)")]
    FieldInUse { name: String, matches: u32 },

    #[error("Team {name} cannot play against itself")]
    TeamCannotPlayItself { name: String },

    #[error("Team {name} has no home field to host a match")]
    TeamHasNoField { name: String },

    #[error("Match already has the maximum of {max} officials")]
    TooManyOfficials { max: u32 },

    #[error("Failed to retrieve next key for table {table}: {message}")]
    Sequence { table: String, message: String },
}

/// Broad family an error belongs to, used to tag failures in the command loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Integrity,
    NotFound,
    Storage,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Conflict => "conflict",
            ErrorCategory::Integrity => "integrity",
            ErrorCategory::NotFound => "not-found",
            ErrorCategory::Storage => "storage",
        };
        write!(f, "{}", s)
    }
}

impl LeagueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LeagueError::UnknownCommand { .. }
            | LeagueError::MissingParameter { .. }
            | LeagueError::InvalidArgument { .. }
            | LeagueError::TooManyParameters { .. }
            | LeagueError::NegativeScore { .. } => ErrorCategory::Validation,

            LeagueError::TeamNameTaken { .. }
            | LeagueError::FieldNameTaken { .. }
            | LeagueError::PlayerAlreadyExists { .. }
            | LeagueError::OfficialAlreadyExists { .. }
            | LeagueError::MatchAlreadyExists { .. }
            | LeagueError::OfficialAlreadyAssigned { .. } => ErrorCategory::Conflict,

            LeagueError::TeamNotEmpty { .. }
            | LeagueError::TeamHasMatches { .. }
            | LeagueError::FieldInUse { .. }
            | LeagueError::TeamCannotPlayItself { .. }
            | LeagueError::TeamHasNoField { .. }
            | LeagueError::TooManyOfficials { .. } => ErrorCategory::Integrity,

            LeagueError::TeamNotFound { .. }
            | LeagueError::FieldNotFound { .. }
            | LeagueError::PlayerNotFound { .. }
            | LeagueError::OfficialNotFound { .. }
            | LeagueError::MatchNotFound { .. } => ErrorCategory::NotFound,

            LeagueError::Database(_)
            | LeagueError::Io(_)
            | LeagueError::Json(_)
            | LeagueError::Sequence { .. } => ErrorCategory::Storage,
        }
    }

    /// Shorthand for a missing positional parameter.
    pub fn missing(command: &str, parameter: &str) -> Self {
        LeagueError::MissingParameter {
            command: command.to_string(),
            parameter: parameter.to_string(),
        }
    }

    pub fn invalid(parameter: &str, value: &str, reason: impl Into<String>) -> Self {
        LeagueError::InvalidArgument {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
