//! Field (venue) persistence

use super::{
    models::Field,
    repository::Repository,
    sequence::{SequenceAllocator, SequenceTable},
};
use crate::{cli::types::FieldId, LeagueError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub struct FieldRepository<'a> {
    conn: &'a Connection,
    sequences: &'a SequenceAllocator,
}

impl<'a> FieldRepository<'a> {
    pub fn new(conn: &'a Connection, sequences: &'a SequenceAllocator) -> Self {
        Self { conn, sequences }
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Field>> {
        let field = self
            .conn
            .query_row(
                "SELECT field_id, name, address FROM fields WHERE name = ?",
                params![name],
                row_to_field,
            )
            .optional()?;
        Ok(field)
    }

    fn match_count(&self, id: FieldId) -> Result<u32> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM matches WHERE field_id = ?",
            params![id.as_i64()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl Repository for FieldRepository<'_> {
    type Entity = Field;
    type Id = FieldId;

    fn find_by_id(&self, id: FieldId) -> Result<Option<Field>> {
        let field = self
            .conn
            .query_row(
                "SELECT field_id, name, address FROM fields WHERE field_id = ?",
                params![id.as_i64()],
                row_to_field,
            )
            .optional()?;
        Ok(field)
    }

    fn list_all(&self) -> Result<Vec<Field>> {
        let mut stmt = self
            .conn
            .prepare("SELECT field_id, name, address FROM fields ORDER BY name")?;
        let rows = stmt.query_map([], row_to_field)?;

        let mut fields = Vec::new();
        for row in rows {
            fields.push(row?);
        }
        Ok(fields)
    }

    fn save(&self, field: &mut Field) -> Result<()> {
        if let Some(existing) = self.find_by_name(&field.name)? {
            if existing.id != field.id {
                return Err(LeagueError::FieldNameTaken {
                    name: field.name.clone(),
                });
            }
        }

        match field.id {
            Some(id) => {
                self.conn.execute(
                    "UPDATE fields SET name = ?, address = ? WHERE field_id = ?",
                    params![field.name, field.address, id.as_i64()],
                )?;
            }
            None => {
                let id = FieldId::new(self.sequences.next_id(self.conn, SequenceTable::Fields)?);
                self.conn.execute(
                    "INSERT INTO fields (field_id, name, address) VALUES (?, ?, ?)",
                    params![id.as_i64(), field.name, field.address],
                )?;
                field.id = Some(id);
            }
        }
        Ok(())
    }

    /// Remove a field that hosts no match; teams playing there lose their home field.
    fn delete(&self, id: FieldId) -> Result<()> {
        let field = self.find_by_id(id)?.ok_or_else(|| LeagueError::FieldNotFound {
            name: format!("#{}", id),
        })?;

        let matches = self.match_count(id)?;
        if matches > 0 {
            return Err(LeagueError::FieldInUse {
                name: field.name,
                matches,
            });
        }

        self.conn.execute(
            "UPDATE teams SET field_id = NULL WHERE field_id = ?",
            params![id.as_i64()],
        )?;
        self.conn
            .execute("DELETE FROM fields WHERE field_id = ?", params![id.as_i64()])?;
        Ok(())
    }
}

fn row_to_field(row: &Row) -> rusqlite::Result<Field> {
    Ok(Field {
        id: Some(FieldId::new(row.get(0)?)),
        name: row.get(1)?,
        address: row.get(2)?,
    })
}
