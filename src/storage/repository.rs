//! Repository interface shared by every entity store.

use super::{
    fields::FieldRepository, matches::MatchRepository, officials::OfficialRepository,
    players::PlayerRepository, sequence::SequenceAllocator, teams::TeamRepository,
};
use crate::Result;
use rusqlite::Connection;

/// Basic persistence operations for one entity type.
///
/// Repositories borrow a connection, which may be a transaction; they never
/// commit on their own. Operations that issue several statements rely on
/// the caller (see [`LeagueDatabase::in_transaction`]) for atomicity.
///
/// [`LeagueDatabase::in_transaction`]: super::LeagueDatabase::in_transaction
pub trait Repository {
    type Entity;
    type Id: Copy;

    fn find_by_id(&self, id: Self::Id) -> Result<Option<Self::Entity>>;

    fn list_all(&self) -> Result<Vec<Self::Entity>>;

    /// Insert when the entity has no id yet (assigning one), update otherwise.
    fn save(&self, entity: &mut Self::Entity) -> Result<()>;

    fn delete(&self, id: Self::Id) -> Result<()>;
}

/// Entry point handing out repositories over one connection.
#[derive(Clone, Copy)]
pub struct Repositories<'a> {
    conn: &'a Connection,
    sequences: &'a SequenceAllocator,
}

impl<'a> Repositories<'a> {
    pub fn new(conn: &'a Connection, sequences: &'a SequenceAllocator) -> Self {
        Self { conn, sequences }
    }

    pub fn fields(&self) -> FieldRepository<'a> {
        FieldRepository::new(self.conn, self.sequences)
    }

    pub fn teams(&self) -> TeamRepository<'a> {
        TeamRepository::new(self.conn, self.sequences)
    }

    pub fn players(&self) -> PlayerRepository<'a> {
        PlayerRepository::new(self.conn, self.sequences)
    }

    pub fn matches(&self) -> MatchRepository<'a> {
        MatchRepository::new(self.conn, self.sequences)
    }

    pub fn officials(&self) -> OfficialRepository<'a> {
        OfficialRepository::new(self.conn, self.sequences)
    }
}
