//! Baseball League Administration Library
//!
//! Keeps the teams, players, fields, officials and matches of a baseball
//! league in a local SQLite database and drives them through a small
//! command language, either typed at a prompt or read from a script.
//!
//! ## Features
//!
//! - **Rosters**: Teams with an optional home field, players with jersey numbers and membership history
//! - **Scheduling**: Matches between two teams at the local team's field
//! - **Officiating**: Up to four officials assigned per match
//! - **Results**: Final scores, result listings by date or team, and standings
//! - **Scripting**: Startup scripts with comment lines, run before or instead of the prompt
//!
//! ## Quick Start
//!
//! ```rust
//! use baseball_league::{
//!     commands::{AppContext, Console},
//!     config::SessionConfig,
//!     session::Session,
//!     storage::LeagueDatabase,
//! };
//!
//! # fn main() -> baseball_league::Result<()> {
//! let db = LeagueDatabase::new_in_memory()?;
//! let mut session = Session::new(AppContext::new(db, SessionConfig::default()));
//!
//! let mut out = Vec::new();
//! let mut console = Console::new(&mut out);
//! session.execute_line("create-team Yankees \"Yankee Stadium\" Bronx", &mut console)?;
//! session.execute_line("list-teams", &mut console)?;
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("Yankees, team #1 (field: Yankee Stadium)"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a database file without passing `--database` each time:
//! ```bash
//! export BASEBALL_LEAGUE_DB=$HOME/league.db
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{FieldId, LeagueDate, LeagueTime, MatchId, OfficialId, PlayerId, TeamId};
pub use error::{ErrorCategory, LeagueError, Result};

pub const DATABASE_ENV_VAR: &str = "BASEBALL_LEAGUE_DB";
