//! Database schema and connection management

use super::{repository::Repositories, sequence::SequenceAllocator};
use crate::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

/// Owner of the single SQLite connection used by a session.
pub struct LeagueDatabase {
    pub(crate) conn: Connection,
    pub(crate) sequences: SequenceAllocator,
}

impl LeagueDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened league database");
        Self::from_connection(conn)
    }

    /// Create a throwaway in-memory database, mostly for tests
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Self {
            conn,
            sequences: SequenceAllocator::default(),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Repositories over the plain connection (autocommit per statement).
    pub fn repos(&self) -> Repositories<'_> {
        Repositories::new(&self.conn, &self.sequences)
    }

    /// Run `f` inside one transaction. Any error rolls back every statement
    /// issued through the repositories handed to `f`.
    pub fn in_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Repositories<'_>) -> Result<T>,
    {
        let tx = self.conn.transaction()?;
        let value = f(&Repositories::new(&tx, &self.sequences))?;
        tx.commit()?;
        Ok(value)
    }

    /// Count rows of a table, used by tests and diagnostics.
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        const KNOWN_TABLES: [&str; 8] = [
            "fields",
            "teams",
            "players",
            "team_memberships",
            "matches",
            "officials",
            "match_officials",
            "sequences",
        ];
        if !KNOWN_TABLES.contains(&table) {
            return Err(crate::LeagueError::invalid("table", table, "unknown table"));
        }
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS fields (
                field_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                address TEXT
            );

            CREATE TABLE IF NOT EXISTS teams (
                team_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                field_id INTEGER REFERENCES fields(field_id)
            );

            CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                last_name TEXT NOT NULL,
                first_name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS team_memberships (
                player_id INTEGER NOT NULL REFERENCES players(player_id),
                team_id INTEGER NOT NULL REFERENCES teams(team_id),
                number INTEGER NOT NULL CHECK (number >= 0),
                join_date TEXT NOT NULL,
                leave_date TEXT
            );

            CREATE TABLE IF NOT EXISTS matches (
                match_id INTEGER PRIMARY KEY,
                local_team_id INTEGER NOT NULL REFERENCES teams(team_id),
                visitor_team_id INTEGER NOT NULL REFERENCES teams(team_id),
                field_id INTEGER NOT NULL REFERENCES fields(field_id),
                match_date TEXT NOT NULL,
                match_time TEXT NOT NULL,
                local_score INTEGER NOT NULL DEFAULT 0 CHECK (local_score >= 0),
                visitor_score INTEGER NOT NULL DEFAULT 0 CHECK (visitor_score >= 0),
                result_recorded INTEGER NOT NULL DEFAULT 0,
                CHECK (local_team_id <> visitor_team_id),
                UNIQUE (match_date, match_time, local_team_id, visitor_team_id)
            );

            CREATE TABLE IF NOT EXISTS officials (
                official_id INTEGER PRIMARY KEY,
                last_name TEXT NOT NULL,
                first_name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS match_officials (
                official_id INTEGER NOT NULL REFERENCES officials(official_id),
                match_id INTEGER NOT NULL REFERENCES matches(match_id),
                PRIMARY KEY (official_id, match_id)
            );

            CREATE TABLE IF NOT EXISTS sequences (
                table_name TEXT PRIMARY KEY,
                next_key INTEGER NOT NULL
            );",
        )?;

        // Create indexes for performance
        self.conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_membership_team
             ON team_memberships(team_id) WHERE leave_date IS NULL;

            CREATE INDEX IF NOT EXISTS idx_match_date
             ON matches(match_date, match_time);",
        )?;

        debug!("league schema initialized");
        Ok(())
    }
}
