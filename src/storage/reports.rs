//! Read-only report queries: match results and standings

use super::{models::*, schema::LeagueDatabase};
use crate::cli::types::{LeagueDate, MatchId, TeamId};
use crate::Result;
use rusqlite::params;
use std::collections::BTreeMap;

/// Which matches a result report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFilter {
    All,
    FromDate(LeagueDate),
    Team(TeamId),
}

impl LeagueDatabase {
    /// Matches with team and field names plus their officials, in schedule order
    pub fn match_results(&self, filter: ResultFilter) -> Result<Vec<MatchResult>> {
        let mut query = String::from(
            "SELECT m.match_id, m.match_date, m.match_time,
                    l.name, v.name, f.name,
                    m.local_score, m.visitor_score, m.result_recorded
             FROM matches m
             JOIN teams l ON l.team_id = m.local_team_id
             JOIN teams v ON v.team_id = m.visitor_team_id
             JOIN fields f ON f.field_id = m.field_id",
        );

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        match filter {
            ResultFilter::All => {}
            ResultFilter::FromDate(date) => {
                query.push_str(" WHERE m.match_date >= ?");
                params.push(Box::new(date));
            }
            ResultFilter::Team(team_id) => {
                query.push_str(" WHERE m.local_team_id = ?1 OR m.visitor_team_id = ?1");
                params.push(Box::new(team_id.as_i64()));
            }
        }
        query.push_str(" ORDER BY m.match_date, m.match_time, m.match_id");

        let mut stmt = self.conn.prepare(&query)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt.query_map(&param_refs[..], |row| {
            Ok(MatchResult {
                match_id: MatchId::new(row.get(0)?),
                date: row.get(1)?,
                time: row.get(2)?,
                local_team: row.get(3)?,
                visitor_team: row.get(4)?,
                field: row.get(5)?,
                local_score: row.get(6)?,
                visitor_score: row.get(7)?,
                result_recorded: row.get(8)?,
                officials: Vec::new(),
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        let matches = self.repos().matches();
        for result in &mut results {
            result.officials = matches
                .officials_for(result.match_id)?
                .iter()
                .map(Official::full_name)
                .collect();
        }
        Ok(results)
    }

    /// Win/loss/tie table over matches with a recorded result.
    ///
    /// Every team appears, including those without a played match. Ordered
    /// by wins (desc), then fewest losses, then name.
    pub fn standings(&self) -> Result<Vec<Standing>> {
        let mut table: BTreeMap<String, Standing> = BTreeMap::new();

        let mut stmt = self.conn.prepare("SELECT name FROM teams")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for name in names {
            let name = name?;
            table.insert(
                name.clone(),
                Standing {
                    team: name,
                    played: 0,
                    wins: 0,
                    losses: 0,
                    ties: 0,
                    runs_for: 0,
                    runs_against: 0,
                },
            );
        }

        let mut stmt = self.conn.prepare(
            "SELECT l.name, v.name, m.local_score, m.visitor_score
             FROM matches m
             JOIN teams l ON l.team_id = m.local_team_id
             JOIN teams v ON v.team_id = m.visitor_team_id
             WHERE m.result_recorded = 1",
        )?;
        let games = stmt.query_map(params![], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, u32>(3)?,
            ))
        })?;

        for game in games {
            let (local, visitor, local_score, visitor_score) = game?;
            if let Some(entry) = table.get_mut(&local) {
                entry.record(local_score, visitor_score);
            }
            if let Some(entry) = table.get_mut(&visitor) {
                entry.record(visitor_score, local_score);
            }
        }

        let mut standings: Vec<Standing> = table.into_values().collect();
        standings.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(a.losses.cmp(&b.losses))
                .then_with(|| a.team.cmp(&b.team))
        });
        Ok(standings)
    }
}

impl Standing {
    fn record(&mut self, scored: u32, allowed: u32) {
        self.played += 1;
        self.runs_for += u64::from(scored);
        self.runs_against += u64::from(allowed);
        match scored.cmp(&allowed) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.ties += 1,
        }
    }
}
