//! Routes a parsed [`Command`] to its handler.

use super::{
    matches::{handle_assign_official, handle_create_match, handle_enter_result},
    officials::{handle_create_official, handle_list_officials},
    players::{handle_create_player, handle_delete_player, handle_list_players},
    registry::COMMANDS,
    reports::{handle_list_fields, handle_list_results, handle_list_standings},
    teams::{handle_create_team, handle_delete_team, handle_list_teams},
    Command,
};
use crate::{
    config::SessionConfig,
    storage::{LeagueDatabase, ResultFilter},
    Result,
};
use std::io::{BufRead, Write};

/// Everything a command needs: the open database and session settings.
pub struct AppContext {
    pub db: LeagueDatabase,
    pub config: SessionConfig,
}

/// Whether the session keeps reading commands after this one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Where a command writes its output and, when interactive, reads answers
/// to confirmation prompts.
pub struct Console<'a> {
    pub out: &'a mut dyn Write,
    input: Option<&'a mut dyn BufRead>,
}

impl<'a> Console<'a> {
    /// Output only; every confirmation is accepted
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out, input: None }
    }

    pub fn interactive(out: &'a mut dyn Write, input: &'a mut dyn BufRead) -> Self {
        Self {
            out,
            input: Some(input),
        }
    }

    /// Ask a yes/no question. Without an input stream the answer is yes;
    /// end of input counts as no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let Some(input) = self.input.as_mut() else {
            return Ok(true);
        };

        write!(self.out, "{} (y/n) ", question)?;
        self.out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            writeln!(self.out)?;
            return Ok(false);
        }
        Ok(matches!(
            answer.trim_start().chars().next(),
            Some('y' | 'Y' | 'o' | 'O')
        ))
    }
}

impl AppContext {
    pub fn new(db: LeagueDatabase, config: SessionConfig) -> Self {
        Self { db, config }
    }

    /// Run one command to completion
    pub fn execute(&mut self, command: Command, console: &mut Console<'_>) -> Result<Outcome> {
        match command {
            Command::CreateTeam {
                team,
                field,
                address,
            } => handle_create_team(self, console, &team, field.as_deref(), address.as_deref())?,
            Command::ListTeams => handle_list_teams(self, console)?,
            Command::DeleteTeam { team } => handle_delete_team(self, console, &team)?,
            Command::CreatePlayer {
                last_name,
                first_name,
                roster,
            } => handle_create_player(self, console, &last_name, &first_name, roster)?,
            Command::ListPlayersForTeam { team } => {
                handle_list_players(self, console, team.as_deref())?
            }
            Command::DeletePlayer {
                last_name,
                first_name,
            } => handle_delete_player(self, console, &last_name, &first_name)?,
            Command::CreateMatch { key } => handle_create_match(self, console, &key)?,
            Command::CreateOfficial {
                last_name,
                first_name,
            } => handle_create_official(self, console, &last_name, &first_name)?,
            Command::ListOfficials => handle_list_officials(self, console)?,
            Command::AssignOfficialToMatch {
                key,
                last_name,
                first_name,
            } => handle_assign_official(self, console, &key, &last_name, &first_name)?,
            Command::EnterMatchResult {
                key,
                local_score,
                visitor_score,
            } => handle_enter_result(self, console, &key, local_score, visitor_score)?,
            Command::ListResultsByDate { from } => {
                let filter = from.map_or(ResultFilter::All, ResultFilter::FromDate);
                handle_list_results(self, console, filter)?
            }
            Command::ListResultsForTeam { team } => {
                let filter = match team {
                    Some(name) => {
                        let team = self.db.repos().teams().require_by_name(&name)?;
                        team.id.map_or(ResultFilter::All, ResultFilter::Team)
                    }
                    None => ResultFilter::All,
                };
                handle_list_results(self, console, filter)?
            }
            Command::ListFields => handle_list_fields(self, console)?,
            Command::ListStandings => handle_list_standings(self, console)?,
            Command::Help => write_help(console.out)?,
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue)
    }
}

fn write_help(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Commands:")?;
    for spec in COMMANDS {
        if spec.usage.is_empty() {
            writeln!(out, " - {} (alias: {})", spec.name, spec.alias)?;
        } else {
            writeln!(out, " - {} {} (alias: {})", spec.name, spec.usage, spec.alias)?;
        }
        writeln!(out, "     {}", spec.summary)?;
    }
    Ok(())
}
