//! Team commands

use super::{dispatch::Console, write_json, AppContext};
use crate::{
    cli::types::TeamId,
    storage::{Field, Repository, Team},
    LeagueError, Result,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// One line of `list-teams`
#[derive(Debug, Serialize)]
struct TeamListing {
    id: Option<TeamId>,
    name: String,
    field: Option<String>,
}

/// Create a team and, when a field name is given, its new home field.
///
/// Both rows are written in one transaction.
pub fn handle_create_team(
    ctx: &mut AppContext,
    console: &mut Console<'_>,
    team: &str,
    field: Option<&str>,
    address: Option<&str>,
) -> Result<()> {
    let created = ctx.db.in_transaction(|repos| {
        let teams = repos.teams();
        if teams.find_by_name(team)?.is_some() {
            return Err(LeagueError::TeamNameTaken {
                name: team.to_string(),
            });
        }

        let field_id = match field {
            Some(name) => {
                let mut field = Field::new(name, address.map(str::to_string));
                repos.fields().save(&mut field)?;
                field.id
            }
            None => None,
        };

        let mut created = Team::new(team, field_id);
        teams.save(&mut created)?;
        Ok(created)
    })?;

    info!(team = %created.name, field = ?field, "created team");
    match field {
        Some(field) => writeln!(console.out, "Team {} created with field {}.", created.name, field)?,
        None => writeln!(console.out, "Team {} created.", created.name)?,
    }
    Ok(())
}

/// Teams ordered by name with their home field
pub fn handle_list_teams(ctx: &mut AppContext, console: &mut Console<'_>) -> Result<()> {
    let repos = ctx.db.repos();
    let field_names: HashMap<_, _> = repos
        .fields()
        .list_all()?
        .into_iter()
        .filter_map(|f| f.id.map(|id| (id, f.name)))
        .collect();

    let listings: Vec<TeamListing> = repos
        .teams()
        .list_all()?
        .into_iter()
        .map(|team| TeamListing {
            field: team.field_id.and_then(|id| field_names.get(&id).cloned()),
            id: team.id,
            name: team.name,
        })
        .collect();

    if ctx.config.as_json {
        return write_json(console.out, &listings);
    }

    if listings.is_empty() {
        writeln!(console.out, "No teams.")?;
        return Ok(());
    }
    for team in &listings {
        let id = team.id.map(|id| id.to_string()).unwrap_or_default();
        match &team.field {
            Some(field) => writeln!(console.out, "{}, team #{} (field: {})", team.name, id, field)?,
            None => writeln!(console.out, "{}, team #{}", team.name, id)?,
        }
    }
    Ok(())
}

/// Delete a team with no active player and no scheduled match
pub fn handle_delete_team(ctx: &mut AppContext, console: &mut Console<'_>, team: &str) -> Result<()> {
    ctx.db.in_transaction(|repos| {
        let teams = repos.teams();
        let found = teams.require_by_name(team)?;
        let id = found.id.ok_or_else(|| LeagueError::TeamNotFound {
            name: team.to_string(),
        })?;
        teams.delete(id)
    })?;

    info!(team, "deleted team");
    writeln!(console.out, "Team {} deleted.", team)?;
    Ok(())
}
