//! Repository implementations for statistics data access.
//!
//! One repository per table; each call runs a single statement on the
//! shared connection.

mod general_statistics;
mod top_time;

pub use general_statistics::GeneralStatisticsRepository;
pub use top_time::TopTimeRepository;

use crate::domain::GameMode;
use parking_lot::Mutex;
use rusqlite::Connection;
use rusqlite::types::Type;
use std::sync::Arc;

pub type DbConn = Arc<Mutex<Connection>>;

/// Read a persisted game mode. Only the exact stored names are accepted so
/// that reads agree with the `game_mode = ?` filters.
pub(super) fn mode_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<GameMode> {
    let raw: String = row.get(idx)?;
    GameMode::ALL
        .into_iter()
        .find(|mode| mode.as_str() == raw)
        .ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                format!("unknown stored game mode: {raw:?}").into(),
            )
        })
}

#[cfg(test)]
mod tests;
