use crate::domain::{GameMode, GameResult, GeneralStatistics, StatsError, TopTime};
use crate::infra::db::Database;
use anyhow::Result;

/// Writes finished games into the store and exposes the reset operations.
pub struct GameRecorder {
    db: Database,
}

impl GameRecorder {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Apply one finished game and return the mode's updated counters.
    ///
    /// Won games also add a leaderboard entry and count towards the
    /// winning time total.
    pub fn record_game(&self, result: &GameResult) -> Result<GeneralStatistics> {
        let repo = self.db.general_statistics_repo();

        let existing = match repo.find_id_by_mode(result.mode)? {
            Some(id) => Some(
                repo.find_by_id(id)?
                    .ok_or_else(|| StatsError::NotFound(format!("general statistics {id}")))?,
            ),
            None => None,
        };

        let mut stats = existing
            .clone()
            .unwrap_or_else(|| GeneralStatistics::new(result.mode));
        stats.games_played = stats.games_played.saturating_add(1);
        stats.fields_uncovered = stats.fields_uncovered.saturating_add(result.fields_uncovered);
        if result.won {
            stats.games_won = stats.games_won.saturating_add(1);
            stats.total_playing_time_seconds = stats
                .total_playing_time_seconds
                .saturating_add(result.playing_time_seconds);
        }

        if existing.is_some() {
            repo.update(&stats)?;
        } else {
            stats.id = repo.insert(&stats)?;
        }

        if result.won {
            let date = result
                .date
                .clone()
                .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            self.db.top_time_repo().insert(&TopTime::new(
                result.mode,
                result.playing_time_seconds,
                date,
            ))?;
        }

        log::info!(
            "Recorded {} game on {} ({}s, {} fields)",
            if result.won { "won" } else { "lost" },
            result.mode,
            result.playing_time_seconds,
            result.fields_uncovered
        );
        Ok(stats)
    }

    pub fn best_time(&self, mode: GameMode) -> Result<Option<u32>> {
        self.db.top_time_repo().best_time(mode)
    }

    /// Clear both tables.
    pub fn reset_all(&self) -> Result<()> {
        let general = self.db.general_statistics_repo().delete_all()?;
        let top_times = self.db.top_time_repo().delete_all()?;
        log::info!(
            "Reset statistics: removed {} general rows and {} top times",
            general,
            top_times
        );
        Ok(())
    }

    /// Clear only the leaderboard, keeping play counters.
    pub fn reset_top_times(&self) -> Result<usize> {
        let removed = self.db.top_time_repo().delete_all()?;
        log::info!("Reset leaderboard: removed {} top times", removed);
        Ok(removed)
    }
}
