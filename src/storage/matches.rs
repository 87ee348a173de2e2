//! Match and officiating assignment persistence

use super::{
    models::{Match, Official, MAX_OFFICIALS_PER_MATCH},
    repository::Repository,
    sequence::{SequenceAllocator, SequenceTable},
};
use crate::{
    cli::types::{FieldId, LeagueDate, LeagueTime, MatchId, OfficialId, TeamId},
    LeagueError, Result,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

const MATCH_COLUMNS: &str = "match_id, local_team_id, visitor_team_id, field_id,
                             match_date, match_time, local_score, visitor_score, result_recorded";

pub struct MatchRepository<'a> {
    conn: &'a Connection,
    sequences: &'a SequenceAllocator,
}

impl<'a> MatchRepository<'a> {
    pub fn new(conn: &'a Connection, sequences: &'a SequenceAllocator) -> Self {
        Self { conn, sequences }
    }

    /// A match is identified by its date, time and the two teams
    pub fn find_by_key(
        &self,
        date: LeagueDate,
        time: LeagueTime,
        local_team_id: TeamId,
        visitor_team_id: TeamId,
    ) -> Result<Option<Match>> {
        let found = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM matches
                     WHERE match_date = ? AND match_time = ?
                       AND local_team_id = ? AND visitor_team_id = ?",
                    MATCH_COLUMNS
                ),
                params![date, time, local_team_id.as_i64(), visitor_team_id.as_i64()],
                row_to_match,
            )
            .optional()?;
        Ok(found)
    }

    fn query_matches(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Match>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_match)?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }
        Ok(matches)
    }

    /// Officials assigned to a match, by last then first name
    pub fn officials_for(&self, match_id: MatchId) -> Result<Vec<Official>> {
        let mut stmt = self.conn.prepare(
            "SELECT o.official_id, o.first_name, o.last_name
             FROM match_officials mo
             JOIN officials o ON o.official_id = mo.official_id
             WHERE mo.match_id = ?
             ORDER BY o.last_name, o.first_name",
        )?;
        let rows = stmt.query_map(params![match_id.as_i64()], |row| {
            Ok(Official {
                id: Some(OfficialId::new(row.get(0)?)),
                first_name: row.get(1)?,
                last_name: row.get(2)?,
            })
        })?;

        let mut officials = Vec::new();
        for row in rows {
            officials.push(row?);
        }
        Ok(officials)
    }

    pub fn official_count(&self, match_id: MatchId) -> Result<u32> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM match_officials WHERE match_id = ?",
            params![match_id.as_i64()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Add an official to a match, keeping the per-match cap
    pub fn assign_official(&self, match_id: MatchId, official: &Official) -> Result<()> {
        let official_id = official.id.ok_or_else(|| LeagueError::OfficialNotFound {
            first_name: official.first_name.clone(),
            last_name: official.last_name.clone(),
        })?;

        let already: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM match_officials WHERE match_id = ? AND official_id = ?)",
            params![match_id.as_i64(), official_id.as_i64()],
            |row| row.get(0),
        )?;
        if already {
            return Err(LeagueError::OfficialAlreadyAssigned {
                official: official.full_name(),
            });
        }

        if self.official_count(match_id)? >= MAX_OFFICIALS_PER_MATCH {
            return Err(LeagueError::TooManyOfficials {
                max: MAX_OFFICIALS_PER_MATCH,
            });
        }

        self.conn.execute(
            "INSERT INTO match_officials (official_id, match_id) VALUES (?, ?)",
            params![official_id.as_i64(), match_id.as_i64()],
        )?;
        debug!(match_id = %match_id, official_id = %official_id, "assigned official");
        Ok(())
    }

    /// Set the final score and mark the result as recorded
    pub fn record_result(&self, match_id: MatchId, local_score: u32, visitor_score: u32) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE matches SET local_score = ?, visitor_score = ?, result_recorded = 1
             WHERE match_id = ?",
            params![local_score, visitor_score, match_id.as_i64()],
        )?;
        if updated == 0 {
            return Err(LeagueError::MatchNotFound {
                description: format!("#{}", match_id),
            });
        }
        Ok(())
    }
}

impl Repository for MatchRepository<'_> {
    type Entity = Match;
    type Id = MatchId;

    fn find_by_id(&self, id: MatchId) -> Result<Option<Match>> {
        let found = self
            .conn
            .query_row(
                &format!("SELECT {} FROM matches WHERE match_id = ?", MATCH_COLUMNS),
                params![id.as_i64()],
                row_to_match,
            )
            .optional()?;
        Ok(found)
    }

    fn list_all(&self) -> Result<Vec<Match>> {
        self.query_matches(
            &format!(
                "SELECT {} FROM matches ORDER BY match_date, match_time, match_id",
                MATCH_COLUMNS
            ),
            params![],
        )
    }

    fn save(&self, game: &mut Match) -> Result<()> {
        if game.local_team_id == game.visitor_team_id {
            return Err(LeagueError::TeamCannotPlayItself {
                name: format!("#{}", game.local_team_id),
            });
        }

        if let Some(existing) =
            self.find_by_key(game.date, game.time, game.local_team_id, game.visitor_team_id)?
        {
            if existing.id != game.id {
                return Err(LeagueError::MatchAlreadyExists {
                    description: format!("{} {}", game.date, game.time),
                });
            }
        }

        match game.id {
            Some(id) => {
                self.conn.execute(
                    "UPDATE matches
                     SET local_team_id = ?, visitor_team_id = ?, field_id = ?,
                         match_date = ?, match_time = ?,
                         local_score = ?, visitor_score = ?, result_recorded = ?
                     WHERE match_id = ?",
                    params![
                        game.local_team_id.as_i64(),
                        game.visitor_team_id.as_i64(),
                        game.field_id.as_i64(),
                        game.date,
                        game.time,
                        game.local_score,
                        game.visitor_score,
                        game.result_recorded,
                        id.as_i64()
                    ],
                )?;
            }
            None => {
                let id = MatchId::new(self.sequences.next_id(self.conn, SequenceTable::Matches)?);
                self.conn.execute(
                    "INSERT INTO matches
                     (match_id, local_team_id, visitor_team_id, field_id,
                      match_date, match_time, local_score, visitor_score, result_recorded)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                    params![
                        id.as_i64(),
                        game.local_team_id.as_i64(),
                        game.visitor_team_id.as_i64(),
                        game.field_id.as_i64(),
                        game.date,
                        game.time,
                        game.local_score,
                        game.visitor_score,
                        game.result_recorded
                    ],
                )?;
                game.id = Some(id);
            }
        }
        Ok(())
    }

    /// Remove a match and its officiating assignments
    fn delete(&self, id: MatchId) -> Result<()> {
        self.conn.execute(
            "DELETE FROM match_officials WHERE match_id = ?",
            params![id.as_i64()],
        )?;
        let deleted = self
            .conn
            .execute("DELETE FROM matches WHERE match_id = ?", params![id.as_i64()])?;
        if deleted == 0 {
            return Err(LeagueError::MatchNotFound {
                description: format!("#{}", id),
            });
        }
        Ok(())
    }
}

fn row_to_match(row: &Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: Some(MatchId::new(row.get(0)?)),
        local_team_id: TeamId::new(row.get(1)?),
        visitor_team_id: TeamId::new(row.get(2)?),
        field_id: FieldId::new(row.get(3)?),
        date: row.get(4)?,
        time: row.get(5)?,
        local_score: row.get(6)?,
        visitor_score: row.get(7)?,
        result_recorded: row.get(8)?,
    })
}
