use super::{DbConn, mode_column};
use crate::domain::{GameMode, GeneralStatistics, GeneralStatisticsId};
use anyhow::Result;
use rusqlite::Row;

const SELECT_COLUMNS: &str = "SELECT id, game_mode, nr_of_played_games, nr_of_won_games, nr_of_uncovered_fields, total_playing_time FROM GENERAL_STATISTICS";

/// Repository for per-mode play counters.
pub struct GeneralStatisticsRepository {
    conn: DbConn,
}

impl GeneralStatisticsRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Insert a new row and return the id the store assigned.
    /// The record's own `id` is ignored.
    pub fn insert(&self, stats: &GeneralStatistics) -> Result<GeneralStatisticsId> {
        stats.validate()?;
        let conn = self.conn.lock();
        conn.execute(
            r#"
            INSERT INTO GENERAL_STATISTICS (game_mode, nr_of_played_games, nr_of_won_games, nr_of_uncovered_fields, total_playing_time)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            (
                stats.game_mode.as_str(),
                stats.games_played,
                stats.games_won,
                stats.fields_uncovered,
                stats.total_playing_time_seconds,
            ),
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Re-insert a row under its own id, e.g. to undo a deletion.
    pub fn insert_with_id(&self, stats: &GeneralStatistics) -> Result<()> {
        stats.validate()?;
        let conn = self.conn.lock();
        conn.execute(
            r#"
            INSERT INTO GENERAL_STATISTICS (id, game_mode, nr_of_played_games, nr_of_won_games, nr_of_uncovered_fields, total_playing_time)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            (
                stats.id,
                stats.game_mode.as_str(),
                stats.games_played,
                stats.games_won,
                stats.fields_uncovered,
                stats.total_playing_time_seconds,
            ),
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: GeneralStatisticsId) -> Result<Option<GeneralStatistics>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;

        let mut rows = stmt.query_map([id], Self::row_to_stats)?;
        if let Some(row) = rows.next() {
            Ok(Some(row?))
        } else {
            Ok(None)
        }
    }

    /// All rows in database order.
    pub fn find_all(&self) -> Result<Vec<GeneralStatistics>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;

        let rows = stmt.query_map([], Self::row_to_stats)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Overwrite every column of the row with `stats.id`.
    /// Returns the number of rows changed (0 for an unknown id).
    pub fn update(&self, stats: &GeneralStatistics) -> Result<usize> {
        stats.validate()?;
        let conn = self.conn.lock();
        let updated = conn.execute(
            r#"
            UPDATE GENERAL_STATISTICS
            SET game_mode = ?2, nr_of_played_games = ?3, nr_of_won_games = ?4,
                nr_of_uncovered_fields = ?5, total_playing_time = ?6
            WHERE id = ?1
            "#,
            (
                stats.id,
                stats.game_mode.as_str(),
                stats.games_played,
                stats.games_won,
                stats.fields_uncovered,
                stats.total_playing_time_seconds,
            ),
        )?;
        Ok(updated)
    }

    pub fn delete(&self, id: GeneralStatisticsId) -> Result<usize> {
        let conn = self.conn.lock();
        let count = conn.execute("DELETE FROM GENERAL_STATISTICS WHERE id = ?1", [id])?;
        Ok(count)
    }

    pub fn delete_all(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count = conn.execute("DELETE FROM GENERAL_STATISTICS", [])?;
        Ok(count)
    }

    /// Id of the row holding counters for `mode`, if one exists.
    /// When several rows match, the most recently inserted wins.
    pub fn find_id_by_mode(&self, mode: GameMode) -> Result<Option<GeneralStatisticsId>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id FROM GENERAL_STATISTICS WHERE game_mode = ?1 ORDER BY id DESC LIMIT 1",
        )?;

        let mut rows = stmt.query([mode.as_str()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    fn row_to_stats(row: &Row) -> rusqlite::Result<GeneralStatistics> {
        Ok(GeneralStatistics {
            id: row.get(0)?,
            game_mode: mode_column(row, 1)?,
            games_played: row.get(2)?,
            games_won: row.get(3)?,
            fields_uncovered: row.get(4)?,
            total_playing_time_seconds: row.get(5)?,
        })
    }
}
