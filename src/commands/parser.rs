//! Turns a console line into a typed [`Command`].

use super::{
    registry::{lookup, CommandKind, CommandSpec},
    Command, MatchKey, RosterSpot,
};
use crate::{
    cli::types::{LeagueDate, LeagueTime},
    LeagueError, Result,
};
use std::collections::VecDeque;

/// Split a line on whitespace. Double quotes group words into one
/// argument: `create-team "Red Sox" "Fenway Park"`.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(LeagueError::invalid("line", line, "unterminated quote"));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parse one line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let mut tokens: VecDeque<String> = tokenize(line)?.into();
    let Some(verb) = tokens.pop_front() else {
        return Ok(None);
    };

    let spec = lookup(&verb).ok_or(LeagueError::UnknownCommand { name: verb })?;
    let mut args = Args {
        spec,
        values: tokens,
        max: 0,
    };
    let command = parse_command(&mut args)?;
    args.finish()?;
    Ok(Some(command))
}

/// Positional arguments of one command, consumed front to back
struct Args {
    spec: &'static CommandSpec,
    values: VecDeque<String>,
    max: usize,
}

impl Args {
    fn required(&mut self, name: &str) -> Result<String> {
        self.max += 1;
        self.values
            .pop_front()
            .ok_or_else(|| LeagueError::missing(self.spec.name, name))
    }

    fn optional(&mut self) -> Option<String> {
        self.max += 1;
        self.values.pop_front()
    }

    /// Reject arguments left after the last expected one
    fn finish(self) -> Result<()> {
        if self.values.is_empty() {
            Ok(())
        } else {
            Err(LeagueError::TooManyParameters {
                command: self.spec.name.to_string(),
                max: self.max,
            })
        }
    }

    fn match_key(&mut self) -> Result<MatchKey> {
        let date = self.required("MatchDate")?.parse::<LeagueDate>()?;
        let time = self.required("MatchTime")?.parse::<LeagueTime>()?;
        let local_team = self.required("LocalTeam")?;
        let visitor_team = self.required("VisitorTeam")?;
        Ok(MatchKey {
            date,
            time,
            local_team,
            visitor_team,
        })
    }
}

fn parse_command(args: &mut Args) -> Result<Command> {
    let command = match args.spec.kind {
        CommandKind::CreateTeam => {
            let team = args.required("TeamName")?;
            let field = args.optional();
            let address = args.optional();
            Command::CreateTeam {
                team,
                field,
                address,
            }
        }
        CommandKind::ListTeams => Command::ListTeams,
        CommandKind::DeleteTeam => Command::DeleteTeam {
            team: args.required("TeamName")?,
        },
        CommandKind::CreatePlayer => {
            let last_name = args.required("LastName")?;
            let first_name = args.required("FirstName")?;
            let roster = match args.optional() {
                None => None,
                Some(team) => {
                    let number = parse_number(&args.required("Number")?)?;
                    let start_date = args
                        .optional()
                        .map(|d| d.parse::<LeagueDate>())
                        .transpose()?;
                    Some(RosterSpot {
                        team,
                        number,
                        start_date,
                    })
                }
            };
            Command::CreatePlayer {
                last_name,
                first_name,
                roster,
            }
        }
        CommandKind::ListPlayersForTeam => Command::ListPlayersForTeam {
            team: args.optional(),
        },
        CommandKind::DeletePlayer => Command::DeletePlayer {
            last_name: args.required("LastName")?,
            first_name: args.required("FirstName")?,
        },
        CommandKind::CreateMatch => Command::CreateMatch {
            key: args.match_key()?,
        },
        CommandKind::CreateOfficial => Command::CreateOfficial {
            last_name: args.required("LastName")?,
            first_name: args.required("FirstName")?,
        },
        CommandKind::ListOfficials => Command::ListOfficials,
        CommandKind::AssignOfficialToMatch => Command::AssignOfficialToMatch {
            key: args.match_key()?,
            last_name: args.required("LastName")?,
            first_name: args.required("FirstName")?,
        },
        CommandKind::EnterMatchResult => {
            let key = args.match_key()?;
            let local_score = parse_score(&args.required("LocalScore")?)?;
            let visitor_score = parse_score(&args.required("VisitorScore")?)?;
            Command::EnterMatchResult {
                key,
                local_score,
                visitor_score,
            }
        }
        CommandKind::ListResultsByDate => Command::ListResultsByDate {
            from: args
                .optional()
                .map(|d| d.parse::<LeagueDate>())
                .transpose()?,
        },
        CommandKind::ListResultsForTeam => Command::ListResultsForTeam {
            team: args.optional(),
        },
        CommandKind::ListFields => Command::ListFields,
        CommandKind::ListStandings => Command::ListStandings,
        CommandKind::Help => Command::Help,
        CommandKind::Quit => Command::Quit,
    };
    Ok(command)
}

fn parse_number(value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| LeagueError::invalid("Number", value, "expected a non-negative integer"))
}

fn parse_score(value: &str) -> Result<u32> {
    let score = value
        .parse::<i64>()
        .map_err(|_| LeagueError::invalid("Score", value, "expected an integer"))?;
    if score < 0 {
        return Err(LeagueError::NegativeScore { value: score });
    }
    u32::try_from(score).map_err(|_| LeagueError::invalid("Score", value, "score too large"))
}
