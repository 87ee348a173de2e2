//! CLI argument definitions and parsing.

pub mod types;

use clap::Parser;
use std::path::PathBuf;

/// Administrative console for a baseball league.
///
/// Starts an interactive prompt backed by a SQLite database. An optional
/// script of commands is executed first.
#[derive(Debug, Parser)]
#[clap(name = "baseball-league", about = "Baseball league administration CLI")]
pub struct LeagueCli {
    /// SQLite database file (or set `BASEBALL_LEAGUE_DB` env var).
    #[clap(long, short)]
    pub database: Option<PathBuf>,

    /// Script of newline-delimited commands to run before the prompt.
    /// Lines starting with `--` are echoed as comments.
    #[clap(long, short)]
    pub script: Option<PathBuf>,

    /// Run the script and exit instead of opening the prompt.
    #[clap(long, requires = "script")]
    pub batch: bool,

    /// Delete players without asking for confirmation.
    #[clap(long, short)]
    pub yes: bool,

    /// Output listings as JSON instead of text lines.
    #[clap(long)]
    pub json: bool,

    /// Log filter, e.g. `debug` or `baseball_league=trace` (defaults to `RUST_LOG`, then `warn`).
    #[clap(long)]
    pub log_level: Option<String>,
}
