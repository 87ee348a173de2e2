//! Player commands

use super::{dispatch::Console, write_json, AppContext, RosterSpot};
use crate::{
    storage::{Player, Repository},
    LeagueError, Result,
};
use serde::Serialize;
use tracing::info;

/// Active players of one team, as listed by `list-players-for-team`
#[derive(Debug, Serialize)]
struct Roster {
    team: String,
    players: Vec<Player>,
}

/// Create a player, optionally placing them on a roster.
///
/// The player row and the membership row are written together.
pub fn handle_create_player(
    ctx: &mut AppContext,
    console: &mut Console<'_>,
    last_name: &str,
    first_name: &str,
    roster: Option<RosterSpot>,
) -> Result<()> {
    let created = ctx.db.in_transaction(|repos| {
        let players = repos.players();
        if players.find_by_name(last_name, first_name)?.is_some() {
            return Err(LeagueError::PlayerAlreadyExists {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            });
        }

        let mut player = Player::new(first_name, last_name);
        if let Some(spot) = &roster {
            let team = repos.teams().require_by_name(&spot.team)?;
            player.team_id = team.id;
            player.number = Some(spot.number);
            player.start_date = spot.start_date;
        }
        players.save(&mut player)?;
        Ok(player)
    })?;

    info!(player = %created.full_name(), team = ?roster.as_ref().map(|r| &r.team), "created player");
    match (&roster, created.number) {
        (Some(spot), Some(number)) => writeln!(
            console.out,
            "Player {} created on {} with number {}.",
            created.full_name(),
            spot.team,
            number
        )?,
        _ => writeln!(console.out, "Player {} created.", created.full_name())?,
    }
    Ok(())
}

/// Roster of one team, or of every team when `team` is omitted
pub fn handle_list_players(
    ctx: &mut AppContext,
    console: &mut Console<'_>,
    team: Option<&str>,
) -> Result<()> {
    let repos = ctx.db.repos();
    let teams = match team {
        Some(name) => vec![repos.teams().require_by_name(name)?],
        None => repos.teams().list_all()?,
    };

    let mut rosters = Vec::with_capacity(teams.len());
    for team in teams {
        let players = match team.id {
            Some(id) => repos.players().list_for_team(id)?,
            None => Vec::new(),
        };
        rosters.push(Roster {
            team: team.name,
            players,
        });
    }

    if ctx.config.as_json {
        return write_json(console.out, &rosters);
    }

    if rosters.is_empty() {
        writeln!(console.out, "No teams.")?;
        return Ok(());
    }
    let single = team.is_some();
    for roster in &rosters {
        if !single {
            writeln!(console.out, "Team: {}", roster.team)?;
        }
        if roster.players.is_empty() {
            writeln!(console.out, "  No players.")?;
        }
        for player in &roster.players {
            let number = player.number.map(|n| n.to_string()).unwrap_or_default();
            writeln!(console.out, "  -> {} #{}", player.full_name(), number)?;
        }
    }
    Ok(())
}

/// Delete a player and their membership history after confirmation
pub fn handle_delete_player(
    ctx: &mut AppContext,
    console: &mut Console<'_>,
    last_name: &str,
    first_name: &str,
) -> Result<()> {
    let player = ctx
        .db
        .repos()
        .players()
        .find_by_name(last_name, first_name)?
        .ok_or_else(|| LeagueError::PlayerNotFound {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })?;
    let id = player.id.ok_or_else(|| LeagueError::PlayerNotFound {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    })?;

    if ctx.config.confirm_deletes
        && !console.confirm(&format!("Delete player {}?", player.full_name()))?
    {
        writeln!(console.out, "Deletion cancelled.")?;
        return Ok(());
    }

    ctx.db.in_transaction(|repos| repos.players().delete(id))?;

    info!(player = %player.full_name(), "deleted player");
    writeln!(console.out, "Player {} deleted.", player.full_name())?;
    Ok(())
}
