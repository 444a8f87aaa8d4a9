//! Typed decoding of the database dump document.
//!
//! Every bad field becomes a [`FieldError`]; rows with at least one bad
//! field are skipped while the remaining rows are still decoded. All errors
//! of one pass are collected into a single [`DecodeReport`].

use crate::domain::{FieldError, GameMode, GeneralStatistics, TopTime};
use crate::infra::db::database::{DB_NAME, TABLE_GENERAL_STATISTICS, TABLE_TOP_TIMES};
use serde_json::{Map, Value};
use std::fmt;

/// Rows that decoded cleanly, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedDump {
    pub general_statistics: Vec<GeneralStatistics>,
    pub top_times: Vec<TopTime>,
}

/// All problems found in one decode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    errors: Vec<FieldError>,
    skipped_rows: usize,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn missing_count(&self) -> usize {
        self.errors.iter().filter(|e| e.is_missing()).count()
    }

    pub fn malformed_count(&self) -> usize {
        self.errors.len() - self.missing_count()
    }

    fn reject_row(&mut self, errors: Vec<FieldError>) {
        self.skipped_rows += 1;
        self.errors.extend(errors);
    }
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} missing and {} malformed fields, {} rows skipped",
            self.missing_count(),
            self.malformed_count(),
            self.skipped_rows
        )?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

/// Result of a decode pass: the usable rows plus everything that was wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub dump: DecodedDump,
    pub report: DecodeReport,
}

pub fn decode_dump(doc: &Value) -> Decoded {
    let mut decoded = Decoded::default();

    let Some(root) = doc.get(DB_NAME) else {
        decoded
            .report
            .errors
            .push(FieldError::missing("document", DB_NAME));
        return decoded;
    };
    let Some(tables) = root.as_object() else {
        decoded
            .report
            .errors
            .push(FieldError::malformed("document", DB_NAME, "expected an object"));
        return decoded;
    };

    if let Some(rows) = table_rows(tables, TABLE_GENERAL_STATISTICS, &mut decoded.report) {
        for (index, row) in rows.iter().enumerate() {
            let location = format!("{TABLE_GENERAL_STATISTICS}[{index}]");
            match decode_general_statistics(row, &location) {
                Ok(stats) => decoded.dump.general_statistics.push(stats),
                Err(errors) => decoded.report.reject_row(errors),
            }
        }
    }

    if let Some(rows) = table_rows(tables, TABLE_TOP_TIMES, &mut decoded.report) {
        for (index, row) in rows.iter().enumerate() {
            let location = format!("{TABLE_TOP_TIMES}[{index}]");
            match decode_top_time(row, &location) {
                Ok(top_time) => decoded.dump.top_times.push(top_time),
                Err(errors) => decoded.report.reject_row(errors),
            }
        }
    }

    decoded
}

fn table_rows<'a>(
    tables: &'a Map<String, Value>,
    table: &str,
    report: &mut DecodeReport,
) -> Option<&'a Vec<Value>> {
    match tables.get(table) {
        None | Some(Value::Null) => {
            report.errors.push(FieldError::missing(DB_NAME, table));
            None
        }
        Some(Value::Array(rows)) => Some(rows),
        Some(_) => {
            report
                .errors
                .push(FieldError::malformed(DB_NAME, table, "expected an array"));
            None
        }
    }
}

/// Collects field results for one row so every bad field gets reported.
struct RowReader<'a> {
    row: Option<&'a Map<String, Value>>,
    location: &'a str,
    errors: Vec<FieldError>,
}

impl<'a> RowReader<'a> {
    fn new(value: &'a Value, location: &'a str) -> Self {
        let mut errors = Vec::new();
        let row = value.as_object();
        if row.is_none() {
            errors.push(FieldError::malformed(location, "row", "expected an object"));
        }
        Self {
            row,
            location,
            errors,
        }
    }

    fn field(&mut self, field: &str) -> Option<&'a Value> {
        let row = self.row?;
        match row.get(field) {
            None | Some(Value::Null) => {
                self.errors.push(FieldError::missing(self.location, field));
                None
            }
            Some(value) => Some(value),
        }
    }

    fn malformed(&mut self, field: &str, reason: impl Into<String>) {
        self.errors
            .push(FieldError::malformed(self.location, field, reason));
    }

    fn integer(&mut self, field: &str) -> Option<i64> {
        let value = self.field(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.malformed(field, format!("expected an integer, got {value}"));
        }
        parsed
    }

    fn count(&mut self, field: &str) -> Option<u32> {
        let value = self.integer(field)?;
        match u32::try_from(value) {
            Ok(count) => Some(count),
            Err(_) => {
                self.malformed(field, format!("{value} is out of range"));
                None
            }
        }
    }

    /// Row ids are optional in the document; aggregation never needs them.
    fn id(&mut self) -> i64 {
        match self.row.and_then(|row| row.get("id")) {
            None | Some(Value::Null) => 0,
            Some(_) => self.integer("id").unwrap_or_default(),
        }
    }

    fn text(&mut self, field: &str) -> Option<String> {
        let value = self.field(field)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.malformed(field, format!("expected a string, got {value}"));
                None
            }
        }
    }

    fn mode(&mut self, field: &str) -> Option<GameMode> {
        let raw = self.text(field)?;
        match raw.parse::<GameMode>() {
            Ok(mode) => Some(mode),
            Err(reason) => {
                self.malformed(field, reason);
                None
            }
        }
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, Vec<FieldError>> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

fn decode_general_statistics(
    value: &Value,
    location: &str,
) -> Result<GeneralStatistics, Vec<FieldError>> {
    let mut reader = RowReader::new(value, location);
    let id = reader.id();
    let game_mode = reader.mode("game_mode");
    let games_played = reader.count("nr_of_played_games");
    let games_won = reader.count("nr_of_won_games");
    let fields_uncovered = reader.count("nr_of_uncovered_fields");
    let total = reader.count("total_playing_time");

    if let (Some(played), Some(won)) = (games_played, games_won)
        && won > played
    {
        reader.malformed(
            "nr_of_won_games",
            format!("{won} won games exceed {played} played games"),
        );
    }

    let stats = match (game_mode, games_played, games_won, fields_uncovered, total) {
        (Some(game_mode), Some(games_played), Some(games_won), Some(fields_uncovered), Some(total)) => {
            Some(GeneralStatistics {
                id,
                game_mode,
                games_played,
                games_won,
                fields_uncovered,
                total_playing_time_seconds: total,
            })
        }
        _ => None,
    };
    reader.finish(stats)
}

fn decode_top_time(value: &Value, location: &str) -> Result<TopTime, Vec<FieldError>> {
    let mut reader = RowReader::new(value, location);
    let id = reader.id();
    let game_mode = reader.mode("game_mode");
    let playing_time = reader.count("playing_time");
    let date = reader.text("date");

    let top_time = match (game_mode, playing_time, date) {
        (Some(game_mode), Some(playing_time_seconds), Some(date)) => Some(TopTime {
            id,
            game_mode,
            playing_time_seconds,
            date,
        }),
        _ => None,
    };
    reader.finish(top_time)
}
