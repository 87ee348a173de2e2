//! Match scheduling, officiating and result commands

use super::{dispatch::Console, AppContext, MatchKey};
use crate::{
    cli::types::{MatchId, TeamId},
    storage::{Match, Repositories, Repository, Team},
    LeagueError, Result,
};
use tracing::info;

fn team_id(team: &Team) -> Result<TeamId> {
    team.id.ok_or_else(|| LeagueError::TeamNotFound {
        name: team.name.clone(),
    })
}

/// Look up the match a key names; any unknown team is reported first
fn find_match(repos: &Repositories<'_>, key: &MatchKey) -> Result<MatchId> {
    let teams = repos.teams();
    let local = team_id(&teams.require_by_name(&key.local_team)?)?;
    let visitor = team_id(&teams.require_by_name(&key.visitor_team)?)?;

    repos
        .matches()
        .find_by_key(key.date, key.time, local, visitor)?
        .and_then(|found| found.id)
        .ok_or_else(|| LeagueError::MatchNotFound {
            description: key.to_string(),
        })
}

/// Schedule a match at the local team's home field
pub fn handle_create_match(ctx: &mut AppContext, console: &mut Console<'_>, key: &MatchKey) -> Result<()> {
    if key.local_team.to_lowercase() == key.visitor_team.to_lowercase() {
        return Err(LeagueError::TeamCannotPlayItself {
            name: key.local_team.clone(),
        });
    }

    ctx.db.in_transaction(|repos| {
        let teams = repos.teams();
        let local = teams.require_by_name(&key.local_team)?;
        let visitor = teams.require_by_name(&key.visitor_team)?;
        let field_id = local.field_id.ok_or_else(|| LeagueError::TeamHasNoField {
            name: local.name.clone(),
        })?;

        let mut game = Match::new(team_id(&local)?, team_id(&visitor)?, field_id, key.date, key.time);
        repos.matches().save(&mut game)
    })?;

    info!(date = %key.date, time = %key.time, local = %key.local_team, visitor = %key.visitor_team, "created match");
    writeln!(console.out, "Match {} created.", key)?;
    Ok(())
}

/// Add an official to a match, up to four per match
pub fn handle_assign_official(
    ctx: &mut AppContext,
    console: &mut Console<'_>,
    key: &MatchKey,
    last_name: &str,
    first_name: &str,
) -> Result<()> {
    let official = ctx.db.in_transaction(|repos| {
        let match_id = find_match(repos, key)?;
        let official = repos
            .officials()
            .find_by_name(last_name, first_name)?
            .ok_or_else(|| LeagueError::OfficialNotFound {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })?;
        repos.matches().assign_official(match_id, &official)?;
        Ok(official)
    })?;

    info!(official = %official.full_name(), game = %key, "assigned official");
    writeln!(
        console.out,
        "Official {} assigned to match {}.",
        official.full_name(),
        key
    )?;
    Ok(())
}

/// Record the final score of a match
pub fn handle_enter_result(
    ctx: &mut AppContext,
    console: &mut Console<'_>,
    key: &MatchKey,
    local_score: u32,
    visitor_score: u32,
) -> Result<()> {
    ctx.db.in_transaction(|repos| {
        let match_id = find_match(repos, key)?;
        repos.matches().record_result(match_id, local_score, visitor_score)
    })?;

    info!(game = %key, local_score, visitor_score, "recorded result");
    writeln!(
        console.out,
        "Result recorded: {} {} - {} {}.",
        key.local_team, local_score, visitor_score, key.visitor_team
    )?;
    Ok(())
}
