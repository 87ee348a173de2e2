//! Official commands

use super::{dispatch::Console, write_json, AppContext};
use crate::{
    storage::{Official, Repository},
    Result,
};
use tracing::info;

pub fn handle_create_official(
    ctx: &mut AppContext,
    console: &mut Console<'_>,
    last_name: &str,
    first_name: &str,
) -> Result<()> {
    let official = ctx.db.in_transaction(|repos| {
        let mut official = Official::new(first_name, last_name);
        repos.officials().save(&mut official)?;
        Ok(official)
    })?;

    info!(official = %official.full_name(), "created official");
    writeln!(console.out, "Official {} created.", official.full_name())?;
    Ok(())
}

/// Officials by last then first name
pub fn handle_list_officials(ctx: &mut AppContext, console: &mut Console<'_>) -> Result<()> {
    let officials = ctx.db.repos().officials().list_all()?;

    if ctx.config.as_json {
        return write_json(console.out, &officials);
    }

    writeln!(console.out, "Officials:")?;
    if officials.is_empty() {
        writeln!(console.out, "  No officials.")?;
    }
    for official in &officials {
        writeln!(console.out, "  {}, {}", official.last_name, official.first_name)?;
    }
    Ok(())
}
