//! Official (referee) persistence

use super::{
    models::Official,
    repository::Repository,
    sequence::{SequenceAllocator, SequenceTable},
};
use crate::{cli::types::OfficialId, LeagueError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub struct OfficialRepository<'a> {
    conn: &'a Connection,
    sequences: &'a SequenceAllocator,
}

impl<'a> OfficialRepository<'a> {
    pub fn new(conn: &'a Connection, sequences: &'a SequenceAllocator) -> Self {
        Self { conn, sequences }
    }

    pub fn find_by_name(&self, last_name: &str, first_name: &str) -> Result<Option<Official>> {
        let official = self
            .conn
            .query_row(
                "SELECT official_id, first_name, last_name FROM officials
                 WHERE last_name = ? AND first_name = ?",
                params![last_name, first_name],
                row_to_official,
            )
            .optional()?;
        Ok(official)
    }
}

impl Repository for OfficialRepository<'_> {
    type Entity = Official;
    type Id = OfficialId;

    fn find_by_id(&self, id: OfficialId) -> Result<Option<Official>> {
        let official = self
            .conn
            .query_row(
                "SELECT official_id, first_name, last_name FROM officials WHERE official_id = ?",
                params![id.as_i64()],
                row_to_official,
            )
            .optional()?;
        Ok(official)
    }

    fn list_all(&self) -> Result<Vec<Official>> {
        let mut stmt = self.conn.prepare(
            "SELECT official_id, first_name, last_name FROM officials
             ORDER BY last_name, first_name",
        )?;
        let rows = stmt.query_map([], row_to_official)?;

        let mut officials = Vec::new();
        for row in rows {
            officials.push(row?);
        }
        Ok(officials)
    }

    fn save(&self, official: &mut Official) -> Result<()> {
        if let Some(existing) = self.find_by_name(&official.last_name, &official.first_name)? {
            if existing.id != official.id {
                return Err(LeagueError::OfficialAlreadyExists {
                    first_name: official.first_name.clone(),
                    last_name: official.last_name.clone(),
                });
            }
        }

        match official.id {
            Some(id) => {
                self.conn.execute(
                    "UPDATE officials SET first_name = ?, last_name = ? WHERE official_id = ?",
                    params![official.first_name, official.last_name, id.as_i64()],
                )?;
            }
            None => {
                let id = OfficialId::new(self.sequences.next_id(self.conn, SequenceTable::Officials)?);
                self.conn.execute(
                    "INSERT INTO officials (official_id, first_name, last_name) VALUES (?, ?, ?)",
                    params![id.as_i64(), official.first_name, official.last_name],
                )?;
                official.id = Some(id);
            }
        }
        Ok(())
    }

    /// Remove an official together with their assignments
    fn delete(&self, id: OfficialId) -> Result<()> {
        self.conn.execute(
            "DELETE FROM match_officials WHERE official_id = ?",
            params![id.as_i64()],
        )?;
        let deleted = self.conn.execute(
            "DELETE FROM officials WHERE official_id = ?",
            params![id.as_i64()],
        )?;
        if deleted == 0 {
            return Err(LeagueError::OfficialNotFound {
                first_name: String::new(),
                last_name: format!("#{}", id),
            });
        }
        Ok(())
    }
}

fn row_to_official(row: &Row) -> rusqlite::Result<Official> {
    Ok(Official {
        id: Some(OfficialId::new(row.get(0)?)),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
    })
}
