use crate::application::statistics::{
    GameRecorder, StatisticsLoader, StatisticsScreen, TopTimesPolicy,
};
use crate::infra::app_config::{AppConfig, load_config};
use crate::infra::db::Database;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Opened store plus the configuration it was opened with.
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
}

impl AppState {
    /// Open the store using the config file and environment.
    pub fn open() -> Result<Self> {
        Self::open_with(load_config(), None)
    }

    /// Open the store, with `db_override` taking precedence over the
    /// configured and default database paths.
    pub fn open_with(config: AppConfig, db_override: Option<PathBuf>) -> Result<Self> {
        let path = db_override
            .or_else(|| config.db_path.clone())
            .unwrap_or_else(Database::default_path);
        let db = Database::open_at(path.clone())
            .with_context(|| format!("failed to open statistics database at {}", path.display()))?;
        Ok(Self { db, config })
    }

    pub fn in_memory(config: AppConfig) -> Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
            config,
        })
    }

    pub fn recorder(&self) -> GameRecorder {
        GameRecorder::new(self.db.clone())
    }

    pub fn loader(&self) -> StatisticsLoader {
        StatisticsLoader::new(self.db.clone(), TopTimesPolicy::from(&self.config))
    }

    pub fn statistics_screen(&self) -> StatisticsScreen {
        StatisticsScreen::new(self.loader())
    }
}
