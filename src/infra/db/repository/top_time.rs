use super::{DbConn, mode_column};
use crate::domain::{GameMode, TopTime, TopTimeId};
use anyhow::Result;
use rusqlite::Row;

/// Repository for leaderboard entries.
pub struct TopTimeRepository {
    conn: DbConn,
}

impl TopTimeRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Insert a new entry and return the id the store assigned.
    pub fn insert(&self, top_time: &TopTime) -> Result<TopTimeId> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO TOP_TIMES (game_mode, playing_time, date) VALUES (?1, ?2, ?3)",
            (
                top_time.game_mode.as_str(),
                top_time.playing_time_seconds,
                &top_time.date,
            ),
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Re-insert an entry under its own id.
    pub fn insert_with_id(&self, top_time: &TopTime) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO TOP_TIMES (id, game_mode, playing_time, date) VALUES (?1, ?2, ?3, ?4)",
            (
                top_time.id,
                top_time.game_mode.as_str(),
                top_time.playing_time_seconds,
                &top_time.date,
            ),
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: TopTimeId) -> Result<Option<TopTime>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT id, game_mode, playing_time, date FROM TOP_TIMES WHERE id = ?1")?;

        let mut rows = stmt.query_map([id], Self::row_to_top_time)?;
        if let Some(row) = rows.next() {
            Ok(Some(row?))
        } else {
            Ok(None)
        }
    }

    /// All entries in database order.
    pub fn find_all(&self) -> Result<Vec<TopTime>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT id, game_mode, playing_time, date FROM TOP_TIMES ORDER BY id")?;

        let rows = stmt.query_map([], Self::row_to_top_time)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Entries of one mode in database order.
    pub fn find_by_mode(&self, mode: GameMode) -> Result<Vec<TopTime>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, game_mode, playing_time, date FROM TOP_TIMES WHERE game_mode = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map([mode.as_str()], Self::row_to_top_time)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn update(&self, top_time: &TopTime) -> Result<usize> {
        let conn = self.conn.lock();
        let updated = conn.execute(
            "UPDATE TOP_TIMES SET game_mode = ?2, playing_time = ?3, date = ?4 WHERE id = ?1",
            (
                top_time.id,
                top_time.game_mode.as_str(),
                top_time.playing_time_seconds,
                &top_time.date,
            ),
        )?;
        Ok(updated)
    }

    pub fn delete(&self, id: TopTimeId) -> Result<usize> {
        let conn = self.conn.lock();
        let count = conn.execute("DELETE FROM TOP_TIMES WHERE id = ?1", [id])?;
        Ok(count)
    }

    pub fn delete_all(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count = conn.execute("DELETE FROM TOP_TIMES", [])?;
        Ok(count)
    }

    /// Fastest recorded time for `mode`, or `None` when the mode has no entries.
    pub fn best_time(&self, mode: GameMode) -> Result<Option<u32>> {
        let conn = self.conn.lock();
        let best: Option<u32> = conn.query_row(
            "SELECT MIN(playing_time) FROM TOP_TIMES WHERE game_mode = ?1",
            [mode.as_str()],
            |row| row.get(0),
        )?;
        Ok(best)
    }

    fn row_to_top_time(row: &Row) -> rusqlite::Result<TopTime> {
        Ok(TopTime {
            id: row.get(0)?,
            game_mode: mode_column(row, 1)?,
            playing_time_seconds: row.get(2)?,
            date: row.get(3)?,
        })
    }
}
