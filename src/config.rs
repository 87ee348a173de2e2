//! Runtime configuration resolved from CLI flags and the environment.

use crate::{cli::LeagueCli, error::LeagueError, Result, DATABASE_ENV_VAR};
use std::path::PathBuf;


/// Settings that shape how a session talks to the operator
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Print listings as JSON documents instead of text lines.
    pub as_json: bool,
    /// Ask before deleting a player when running interactively.
    pub confirm_deletes: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            as_json: false,
            confirm_deletes: true,
        }
    }
}

impl SessionConfig {
    pub fn from_cli(cli: &LeagueCli) -> Self {
        Self {
            as_json: cli.json,
            confirm_deletes: !cli.yes,
        }
    }
}

/// Resolve the database path from option, environment variable, or the
/// platform data directory.
pub fn resolve_database_path(database: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = database {
        return Ok(path);
    }

    if let Some(path) = std::env::var_os(DATABASE_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    default_database_path()
}

/// Path: <data dir>/baseball-league/league.db
pub fn default_database_path() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .ok_or_else(|| {
            LeagueError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;
    Ok(base.join("baseball-league").join("league.db"))
}
