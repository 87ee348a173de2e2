//! Primary key allocation through the `sequences` side table.
//!
//! Every entity table takes explicit integer keys. The next key for a table
//! is kept in `sequences`; a table seen for the first time is seeded with one
//! past its current maximum key.

use crate::{LeagueError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use tracing::debug;

/// Entity tables whose keys come from the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceTable {
    Fields,
    Teams,
    Players,
    Matches,
    Officials,
}

impl SequenceTable {
    pub fn table_name(&self) -> &'static str {
        match self {
            SequenceTable::Fields => "fields",
            SequenceTable::Teams => "teams",
            SequenceTable::Players => "players",
            SequenceTable::Matches => "matches",
            SequenceTable::Officials => "officials",
        }
    }

    pub fn key_column(&self) -> &'static str {
        match self {
            SequenceTable::Fields => "field_id",
            SequenceTable::Teams => "team_id",
            SequenceTable::Players => "player_id",
            SequenceTable::Matches => "match_id",
            SequenceTable::Officials => "official_id",
        }
    }
}

impl fmt::Display for SequenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

/// Hands out strictly increasing keys per table.
///
/// The mutex serializes the read-increment-write on `sequences` and holds
/// the last key issued per table. A key allocated inside a transaction that
/// is later rolled back is therefore never issued a second time by this
/// process, even though the stored counter went back.
#[derive(Debug, Default)]
pub struct SequenceAllocator {
    issued: Mutex<HashMap<SequenceTable, i64>>,
}

impl SequenceAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next key for `table` and advance the stored counter
    pub fn next_id(&self, conn: &Connection, table: SequenceTable) -> Result<i64> {
        let mut issued = self.issued.lock().map_err(|_| LeagueError::Sequence {
            table: table.to_string(),
            message: "allocator lock poisoned".to_string(),
        })?;

        let sequence_error = |e: rusqlite::Error| LeagueError::Sequence {
            table: table.to_string(),
            message: e.to_string(),
        };

        let stored: Option<i64> = conn
            .query_row(
                "SELECT next_key FROM sequences WHERE table_name = ?",
                params![table.table_name()],
                |row| row.get(0),
            )
            .optional()
            .map_err(sequence_error)?;

        let stored = match stored {
            Some(next_key) => next_key,
            None => {
                let seed: i64 = conn
                    .query_row(
                        &format!(
                            "SELECT COALESCE(MAX({}), 0) + 1 FROM {}",
                            table.key_column(),
                            table.table_name()
                        ),
                        [],
                        |row| row.get(0),
                    )
                    .map_err(sequence_error)?;
                conn.execute(
                    "INSERT INTO sequences (table_name, next_key) VALUES (?, ?)",
                    params![table.table_name(), seed],
                )
                .map_err(sequence_error)?;
                debug!(table = %table, seed, "seeded sequence");
                seed
            }
        };

        let next = match issued.get(&table) {
            Some(&last) if last >= stored => last + 1,
            _ => stored,
        };

        conn.execute(
            "UPDATE sequences SET next_key = ? WHERE table_name = ?",
            params![next + 1, table.table_name()],
        )
        .map_err(sequence_error)?;

        issued.insert(table, next);
        debug!(table = %table, id = next, "allocated key");
        Ok(next)
    }
}
