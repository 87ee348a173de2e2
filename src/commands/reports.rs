//! Read-only listings: results, fields and standings

use super::{dispatch::Console, write_json, AppContext};
use crate::{
    storage::{MatchResult, Repository, ResultFilter},
    Result,
};
use std::io::Write;

/// Matches in schedule order, each followed by its officials
pub fn handle_list_results(
    ctx: &mut AppContext,
    console: &mut Console<'_>,
    filter: ResultFilter,
) -> Result<()> {
    let results = ctx.db.match_results(filter)?;

    if ctx.config.as_json {
        return write_json(console.out, &results);
    }

    if results.is_empty() {
        writeln!(console.out, "No matches.")?;
        return Ok(());
    }
    for result in &results {
        write_result(console.out, result)?;
    }
    Ok(())
}

fn write_result(out: &mut dyn Write, result: &MatchResult) -> Result<()> {
    writeln!(
        out,
        "Match #{}: {} {} at {}",
        result.match_id, result.date, result.time, result.field
    )?;
    if result.result_recorded {
        writeln!(
            out,
            "  {} {} - {} {}",
            result.local_team, result.local_score, result.visitor_score, result.visitor_team
        )?;
    } else {
        writeln!(
            out,
            "  {} vs {} (no result yet)",
            result.local_team, result.visitor_team
        )?;
    }

    if result.officials.is_empty() {
        writeln!(out, "  No officials for this match.")?;
    } else {
        writeln!(out, "  Officials: {}", result.officials.join(", "))?;
    }
    Ok(())
}

/// Fields by name with their address when known
pub fn handle_list_fields(ctx: &mut AppContext, console: &mut Console<'_>) -> Result<()> {
    let fields = ctx.db.repos().fields().list_all()?;

    if ctx.config.as_json {
        return write_json(console.out, &fields);
    }

    if fields.is_empty() {
        writeln!(console.out, "No fields.")?;
    }
    for field in &fields {
        match &field.address {
            Some(address) => writeln!(console.out, "{} ({})", field.name, address)?,
            None => writeln!(console.out, "{}", field.name)?,
        }
    }
    Ok(())
}

pub fn handle_list_standings(ctx: &mut AppContext, console: &mut Console<'_>) -> Result<()> {
    let standings = ctx.db.standings()?;

    if ctx.config.as_json {
        return write_json(console.out, &standings);
    }

    if standings.is_empty() {
        writeln!(console.out, "No teams.")?;
        return Ok(());
    }

    let width = standings
        .iter()
        .map(|s| s.team.chars().count())
        .max()
        .unwrap_or(0)
        .max("Team".len());
    writeln!(
        console.out,
        "{:<width$}  {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}",
        "Team",
        "GP",
        "W",
        "L",
        "T",
        "RF",
        "RA",
        width = width
    )?;
    for s in &standings {
        writeln!(
            console.out,
            "{:<width$}  {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}",
            s.team,
            s.played,
            s.wins,
            s.losses,
            s.ties,
            s.runs_for,
            s.runs_against,
            width = width
        )?;
    }
    Ok(())
}
