//! Player and team membership persistence

use super::{
    models::{Membership, Player},
    repository::Repository,
    sequence::{SequenceAllocator, SequenceTable},
};
use crate::{
    cli::types::{LeagueDate, PlayerId, TeamId},
    LeagueError, Result,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Player columns joined with the open membership, if any
const PLAYER_SELECT: &str = "SELECT p.player_id, p.first_name, p.last_name,
                                    m.team_id, m.number, m.join_date
                             FROM players p
                             LEFT JOIN team_memberships m
                               ON m.player_id = p.player_id AND m.leave_date IS NULL";

pub struct PlayerRepository<'a> {
    conn: &'a Connection,
    sequences: &'a SequenceAllocator,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(conn: &'a Connection, sequences: &'a SequenceAllocator) -> Self {
        Self { conn, sequences }
    }

    pub fn find_by_name(&self, last_name: &str, first_name: &str) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                &format!("{} WHERE p.last_name = ? AND p.first_name = ?", PLAYER_SELECT),
                params![last_name, first_name],
                row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    /// Active players of a team ordered by jersey number
    pub fn list_for_team(&self, team_id: TeamId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE m.team_id = ? ORDER BY m.number, p.last_name, p.first_name",
            PLAYER_SELECT
        ))?;
        let rows = stmt.query_map(params![team_id.as_i64()], row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Every membership of a player, oldest first
    pub fn memberships(&self, player_id: PlayerId) -> Result<Vec<Membership>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, team_id, number, join_date, leave_date
             FROM team_memberships
             WHERE player_id = ?
             ORDER BY join_date, leave_date IS NULL",
        )?;
        let rows = stmt.query_map(params![player_id.as_i64()], |row| {
            Ok(Membership {
                player_id: PlayerId::new(row.get(0)?),
                team_id: TeamId::new(row.get(1)?),
                number: row.get(2)?,
                join_date: row.get(3)?,
                leave_date: row.get(4)?,
            })
        })?;

        let mut memberships = Vec::new();
        for row in rows {
            memberships.push(row?);
        }
        Ok(memberships)
    }

    /// Close the open membership, if any, as of `date`
    pub fn leave_team(&self, player_id: PlayerId, date: LeagueDate) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE team_memberships SET leave_date = ?
             WHERE player_id = ? AND leave_date IS NULL",
            params![date, player_id.as_i64()],
        )?;
        Ok(rows > 0)
    }

    /// Bring the open membership in line with the player's team fields.
    fn sync_membership(&self, player_id: PlayerId, player: &mut Player) -> Result<()> {
        let current = self.find_by_id(player_id)?;
        let current_team = current.as_ref().and_then(|p| p.team_id);
        let current_number = current.as_ref().and_then(|p| p.number);

        match player.team_id {
            None => {
                if current_team.is_some() {
                    self.leave_team(player_id, LeagueDate::today())?;
                }
                player.number = None;
                player.start_date = None;
            }
            Some(team_id) => {
                let number = player
                    .number
                    .ok_or_else(|| LeagueError::missing("player", "Number"))?;
                if current_team == Some(team_id) && current_number == Some(number) {
                    return Ok(());
                }
                let join_date = player.start_date.unwrap_or_else(LeagueDate::today);
                if current_team.is_some() {
                    self.leave_team(player_id, join_date)?;
                }
                self.conn.execute(
                    "INSERT INTO team_memberships (player_id, team_id, number, join_date, leave_date)
                     VALUES (?, ?, ?, ?, NULL)",
                    params![player_id.as_i64(), team_id.as_i64(), number, join_date],
                )?;
                player.start_date = Some(join_date);
            }
        }
        Ok(())
    }
}

impl Repository for PlayerRepository<'_> {
    type Entity = Player;
    type Id = PlayerId;

    fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                &format!("{} WHERE p.player_id = ?", PLAYER_SELECT),
                params![id.as_i64()],
                row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    fn list_all(&self) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} ORDER BY p.last_name, p.first_name",
            PLAYER_SELECT
        ))?;
        let rows = stmt.query_map([], row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Save the player row, then open or close a membership to match
    /// `team_id`/`number`/`start_date`.
    fn save(&self, player: &mut Player) -> Result<()> {
        if let Some(existing) = self.find_by_name(&player.last_name, &player.first_name)? {
            if existing.id != player.id {
                return Err(LeagueError::PlayerAlreadyExists {
                    first_name: player.first_name.clone(),
                    last_name: player.last_name.clone(),
                });
            }
        }

        let id = match player.id {
            Some(id) => {
                self.conn.execute(
                    "UPDATE players SET first_name = ?, last_name = ? WHERE player_id = ?",
                    params![player.first_name, player.last_name, id.as_i64()],
                )?;
                id
            }
            None => {
                let id = PlayerId::new(self.sequences.next_id(self.conn, SequenceTable::Players)?);
                self.conn.execute(
                    "INSERT INTO players (player_id, first_name, last_name) VALUES (?, ?, ?)",
                    params![id.as_i64(), player.first_name, player.last_name],
                )?;
                player.id = Some(id);
                id
            }
        };

        self.sync_membership(id, player)
    }

    fn delete(&self, id: PlayerId) -> Result<()> {
        let deleted_memberships = self.conn.execute(
            "DELETE FROM team_memberships WHERE player_id = ?",
            params![id.as_i64()],
        )?;
        let deleted = self
            .conn
            .execute("DELETE FROM players WHERE player_id = ?", params![id.as_i64()])?;
        if deleted == 0 {
            return Err(LeagueError::PlayerNotFound {
                first_name: String::new(),
                last_name: format!("#{}", id),
            });
        }
        tracing::debug!(player = %id, deleted_memberships, "deleted player");
        Ok(())
    }
}

fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    let team_id: Option<i64> = row.get(3)?;
    Ok(Player {
        id: Some(PlayerId::new(row.get(0)?)),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        team_id: team_id.map(TeamId::new),
        number: row.get(4)?,
        start_date: row.get(5)?,
    })
}
