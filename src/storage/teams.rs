//! Team persistence

use super::{
    models::Team,
    repository::Repository,
    sequence::{SequenceAllocator, SequenceTable},
};
use crate::{
    cli::types::{FieldId, TeamId},
    LeagueError, Result,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub struct TeamRepository<'a> {
    conn: &'a Connection,
    sequences: &'a SequenceAllocator,
}

impl<'a> TeamRepository<'a> {
    pub fn new(conn: &'a Connection, sequences: &'a SequenceAllocator) -> Self {
        Self { conn, sequences }
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, name, field_id FROM teams WHERE name = ?",
                params![name],
                row_to_team,
            )
            .optional()?;
        Ok(team)
    }

    /// Like [`find_by_name`](Self::find_by_name) but absence is an error
    pub fn require_by_name(&self, name: &str) -> Result<Team> {
        self.find_by_name(name)?.ok_or_else(|| LeagueError::TeamNotFound {
            name: name.to_string(),
        })
    }

    /// Players whose membership on this team is still open
    pub fn active_player_count(&self, id: TeamId) -> Result<u32> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM team_memberships WHERE team_id = ? AND leave_date IS NULL",
            params![id.as_i64()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn match_count(&self, id: TeamId) -> Result<u32> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM matches WHERE local_team_id = ?1 OR visitor_team_id = ?1",
            params![id.as_i64()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl Repository for TeamRepository<'_> {
    type Entity = Team;
    type Id = TeamId;

    fn find_by_id(&self, id: TeamId) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, name, field_id FROM teams WHERE team_id = ?",
                params![id.as_i64()],
                row_to_team,
            )
            .optional()?;
        Ok(team)
    }

    fn list_all(&self) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_id, name, field_id FROM teams ORDER BY name")?;
        let rows = stmt.query_map([], row_to_team)?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row?);
        }
        Ok(teams)
    }

    fn save(&self, team: &mut Team) -> Result<()> {
        if let Some(existing) = self.find_by_name(&team.name)? {
            if existing.id != team.id {
                return Err(LeagueError::TeamNameTaken {
                    name: team.name.clone(),
                });
            }
        }

        let field_id = team.field_id.map(|f| f.as_i64());
        match team.id {
            Some(id) => {
                self.conn.execute(
                    "UPDATE teams SET name = ?, field_id = ? WHERE team_id = ?",
                    params![team.name, field_id, id.as_i64()],
                )?;
            }
            None => {
                let id = TeamId::new(self.sequences.next_id(self.conn, SequenceTable::Teams)?);
                self.conn.execute(
                    "INSERT INTO teams (team_id, name, field_id) VALUES (?, ?, ?)",
                    params![id.as_i64(), team.name, field_id],
                )?;
                team.id = Some(id);
            }
        }
        Ok(())
    }

    /// Delete a team with no active player and no match.
    ///
    /// Closed memberships are removed along with the team.
    fn delete(&self, id: TeamId) -> Result<()> {
        let team = self.find_by_id(id)?.ok_or_else(|| LeagueError::TeamNotFound {
            name: format!("#{}", id),
        })?;

        let players = self.active_player_count(id)?;
        if players > 0 {
            return Err(LeagueError::TeamNotEmpty {
                name: team.name,
                players,
            });
        }

        let matches = self.match_count(id)?;
        if matches > 0 {
            return Err(LeagueError::TeamHasMatches {
                name: team.name,
                matches,
            });
        }

        self.conn.execute(
            "DELETE FROM team_memberships WHERE team_id = ?",
            params![id.as_i64()],
        )?;
        self.conn
            .execute("DELETE FROM teams WHERE team_id = ?", params![id.as_i64()])?;
        Ok(())
    }
}

fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
    let field_id: Option<i64> = row.get(2)?;
    Ok(Team {
        id: Some(TeamId::new(row.get(0)?)),
        name: row.get(1)?,
        field_id: field_id.map(FieldId::new),
    })
}
