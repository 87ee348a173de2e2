//! Entry point: parse CLI, open the database and run the session.

use anyhow::Context;
use baseball_league::{
    cli::LeagueCli,
    commands::{AppContext, Outcome},
    config::{resolve_database_path, SessionConfig},
    logging::init_tracing,
    session::Session,
    storage::LeagueDatabase,
};
use clap::Parser;
use std::io;

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    let cli = LeagueCli::parse();
    init_tracing(cli.log_level.as_deref());

    let path = resolve_database_path(cli.database.clone())?;
    let db = LeagueDatabase::open(&path)
        .with_context(|| format!("Failed to open league database at {}", path.display()))?;

    let mut session = Session::new(AppContext::new(db, SessionConfig::from_cli(&cli)));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(script) = &cli.script {
        if session.run_script(script, &mut out)? == Outcome::Quit {
            return Ok(());
        }
    }

    if !cli.batch {
        session.run_interactive(io::stdin().lock(), &mut out)?;
    }

    Ok(())
}
