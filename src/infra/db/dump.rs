//! Full-database export as a nested JSON document.
//!
//! Shape: `{PF_MINESWEEPER_DB: {GENERAL_STATISTICS: [...], TOP_TIMES: [...]}}`
//! with one flat object per row, keyed by column name.

use super::Database;
use super::database::{DB_NAME, TABLE_GENERAL_STATISTICS, TABLE_TOP_TIMES};
use anyhow::Result;
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use serde_json::{Map, Number, Value};

const GENERAL_STATISTICS_COLUMNS: [&str; 6] = [
    "id",
    "game_mode",
    "nr_of_played_games",
    "nr_of_won_games",
    "nr_of_uncovered_fields",
    "total_playing_time",
];
const TOP_TIMES_COLUMNS: [&str; 4] = ["id", "game_mode", "playing_time", "date"];

impl Database {
    /// Read both tables and serialize them into the dump document.
    ///
    /// Columns are copied as stored, untyped: NULLs and out-of-domain values
    /// end up in the document so the decoder can reject only the rows they
    /// belong to.
    pub fn dump(&self) -> Result<Value> {
        let conn = self.connection();
        let conn = conn.lock();
        let general = dump_table(&conn, TABLE_GENERAL_STATISTICS, &GENERAL_STATISTICS_COLUMNS)?;
        let top_times = dump_table(&conn, TABLE_TOP_TIMES, &TOP_TIMES_COLUMNS)?;
        log::debug!(
            "Dumped {} general statistics rows and {} top times",
            general.len(),
            top_times.len()
        );

        let mut tables = Map::new();
        tables.insert(TABLE_GENERAL_STATISTICS.to_string(), Value::Array(general));
        tables.insert(TABLE_TOP_TIMES.to_string(), Value::Array(top_times));

        let mut root = Map::new();
        root.insert(DB_NAME.to_string(), Value::Object(tables));
        Ok(Value::Object(root))
    }
}

fn dump_table(conn: &Connection, table: &str, columns: &[&str]) -> Result<Vec<Value>> {
    let sql = format!("SELECT {} FROM {table} ORDER BY id", columns.join(", "));
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        let mut object = Map::new();
        for (idx, column) in columns.iter().enumerate() {
            object.insert(column.to_string(), column_value(row.get_ref(idx)?));
        }
        Ok(Value::Object(object))
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn column_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::domain::{GameMode, GeneralStatistics, TopTime};

    #[test]
    fn test_dump_empty_database() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let doc = db.dump()?;
        assert_eq!(
            doc,
            json!({ "PF_MINESWEEPER_DB": { "GENERAL_STATISTICS": [], "TOP_TIMES": [] } })
        );
        Ok(())
    }

    #[test]
    fn test_dump_rows_keyed_by_column() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        let mut stats = GeneralStatistics::new(GameMode::Easy);
        stats.games_played = 2;
        stats.games_won = 1;
        stats.fields_uncovered = 30;
        stats.total_playing_time_seconds = 65;
        let id = db.general_statistics_repo().insert(&stats)?;
        db.top_time_repo()
            .insert(&TopTime::new(GameMode::Easy, 65, "2024-01-02"))?;

        let doc = db.dump()?;
        let tables = &doc["PF_MINESWEEPER_DB"];
        assert_eq!(
            tables["GENERAL_STATISTICS"][0],
            json!({
                "id": id,
                "game_mode": "easy",
                "nr_of_played_games": 2,
                "nr_of_won_games": 1,
                "nr_of_uncovered_fields": 30,
                "total_playing_time": 65
            })
        );
        assert_eq!(tables["TOP_TIMES"][0]["playing_time"], 65);
        assert_eq!(tables["TOP_TIMES"][0]["date"], "2024-01-02");
        Ok(())
    }

    #[test]
    fn test_dump_keeps_raw_legacy_values() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        {
            let conn = db.connection();
            let guard = conn.lock();
            guard.execute_batch(
                "PRAGMA ignore_check_constraints = ON;
                 INSERT INTO TOP_TIMES (game_mode, playing_time, date) VALUES ('expert', -3, 'x');",
            )?;
        }

        let doc = db.dump()?;
        let row = &doc["PF_MINESWEEPER_DB"]["TOP_TIMES"][0];
        assert_eq!(row["game_mode"], "expert");
        assert_eq!(row["playing_time"], -3);
        Ok(())
    }

    #[test]
    fn test_column_value_conversion() {
        assert_eq!(column_value(ValueRef::Null), Value::Null);
        assert_eq!(column_value(ValueRef::Integer(7)), json!(7));
        assert_eq!(column_value(ValueRef::Real(1.5)), json!(1.5));
        assert_eq!(column_value(ValueRef::Text(b"easy")), json!("easy"));
    }
}
