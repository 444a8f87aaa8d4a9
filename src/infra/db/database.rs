//! SQLite database setup and connection management for the statistics store.
//! Handles database location, schema creation and versioned migrations.

use super::repository::{DbConn, GeneralStatisticsRepository, TopTimeRepository};
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;

/// Name of the database, also the root key of the dump document.
pub const DB_NAME: &str = "PF_MINESWEEPER_DB";
pub const TABLE_GENERAL_STATISTICS: &str = "GENERAL_STATISTICS";
pub const TABLE_TOP_TIMES: &str = "TOP_TIMES";

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 3;

/// Database wrapper that owns the SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: DbConn,
    path: Option<PathBuf>,
}

impl Database {
    /// Create or open the database at the default location
    pub fn open() -> Result<Self> {
        Self::open_at(Self::default_path())
    }

    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        };
        db.init()?;
        Ok(db)
    }

    /// Create or open the database at a specific path
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path),
        };
        db.init()?;
        log::debug!("Opened statistics database at {}", db.describe_location());
        Ok(db)
    }

    /// Get the default database path
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("MINESWEEPER_STATS_DB_PATH") {
            return PathBuf::from(path);
        }
        crate::infra::app_config::app_data_dir().join("stats.sqlite")
    }

    /// File backing this database, `None` for in-memory databases.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn describe_location(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => ":memory:".to_string(),
        }
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> DbConn {
        self.conn.clone()
    }

    pub fn general_statistics_repo(&self) -> GeneralStatisticsRepository {
        GeneralStatisticsRepository::new(self.connection())
    }

    pub fn top_time_repo(&self) -> TopTimeRepository {
        TopTimeRepository::new(self.connection())
    }

    /// Initialize database schema
    fn init(&self) -> Result<()> {
        let conn = self.conn.lock();

        let existing_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if existing_version == 0 {
            // Fresh database: create the current schema directly
            Self::create_schema(&conn)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        } else if existing_version < SCHEMA_VERSION {
            log::info!(
                "Migrating statistics database from version {} to {}",
                existing_version,
                SCHEMA_VERSION
            );
            for version in (existing_version + 1)..=SCHEMA_VERSION {
                Self::run_migration(&conn, version)?;
            }
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        } else if existing_version > SCHEMA_VERSION {
            return Err(anyhow::anyhow!(
                "Statistics database has schema version {}, newer than supported version {}",
                existing_version,
                SCHEMA_VERSION
            ));
        }

        Ok(())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS GENERAL_STATISTICS (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_mode TEXT NOT NULL CHECK (game_mode IN ('easy','medium','hard')),
                nr_of_played_games INTEGER NOT NULL DEFAULT 0 CHECK (nr_of_played_games >= 0),
                nr_of_won_games INTEGER NOT NULL DEFAULT 0 CHECK (nr_of_won_games >= 0),
                nr_of_uncovered_fields INTEGER NOT NULL DEFAULT 0 CHECK (nr_of_uncovered_fields >= 0),
                total_playing_time INTEGER NOT NULL DEFAULT 0 CHECK (total_playing_time >= 0)
            );

            CREATE TABLE IF NOT EXISTS TOP_TIMES (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_mode TEXT NOT NULL CHECK (game_mode IN ('easy','medium','hard')),
                playing_time INTEGER NOT NULL CHECK (playing_time >= 0),
                date TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_top_times_mode_time ON TOP_TIMES(game_mode, playing_time);
            "#,
        )?;
        Ok(())
    }

    /// Execute a migration for the specified version.
    ///
    /// Version 1 is the schema written by earlier app releases; every
    /// later version has one embedded script under `migrations/`.
    fn run_migration(conn: &Connection, version: i32) -> Result<()> {
        let sql = match version {
            2 => include_str!("../../../migrations/0002_top_times_mode_index.sql"),
            3 => include_str!("../../../migrations/0003_normalize_game_modes.sql"),
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown migration version: {}. Add the migration to run_migration() in database.rs",
                    version
                ));
            }
        };

        conn.execute_batch(sql)
            .map_err(|e| anyhow::anyhow!("Failed to execute migration {}: {}", version, e))?;

        Ok(())
    }
}
