//! Storage layer for the baseball league CLI
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection, schema and transactions
//! - `sequence`: Primary key allocation through the `sequences` table
//! - `repository`: The `Repository` trait and the per-entity stores
//!   (`fields`, `teams`, `players`, `matches`, `officials`)
//! - `reports`: Read-only result and standings queries

pub mod fields;
pub mod matches;
pub mod models;
pub mod officials;
pub mod players;
pub mod reports;
pub mod repository;
pub mod schema;
pub mod sequence;
pub mod teams;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use reports::ResultFilter;
pub use repository::{Repositories, Repository};
pub use schema::LeagueDatabase;
pub use sequence::{SequenceAllocator, SequenceTable};
