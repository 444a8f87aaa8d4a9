use super::GameMode;
use super::error::StatsError;
use serde::{Deserialize, Serialize};

/// Row id of a general statistics record.
pub type GeneralStatisticsId = i64;

/// Row id of a top time record.
pub type TopTimeId = i64;

/// Per-mode play counters.
///
/// Serialized field names match the persisted column names, so the same
/// shape is used for rows in the database dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralStatistics {
    /// Row id. Ignored by plain inserts, which let the store assign one.
    pub id: GeneralStatisticsId,
    pub game_mode: GameMode,
    #[serde(rename = "nr_of_played_games")]
    pub games_played: u32,
    #[serde(rename = "nr_of_won_games")]
    pub games_won: u32,
    #[serde(rename = "nr_of_uncovered_fields")]
    pub fields_uncovered: u32,
    /// Summed playing time of won games, in seconds.
    #[serde(rename = "total_playing_time")]
    pub total_playing_time_seconds: u32,
}

impl GeneralStatistics {
    /// Empty counters for `mode`, not yet persisted.
    pub fn new(mode: GameMode) -> Self {
        Self {
            id: 0,
            game_mode: mode,
            games_played: 0,
            games_won: 0,
            fields_uncovered: 0,
            total_playing_time_seconds: 0,
        }
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        if self.games_won > self.games_played {
            return Err(StatsError::InvalidRecord(format!(
                "games_won ({}) exceeds games_played ({}) for mode {}",
                self.games_won, self.games_played, self.game_mode
            )));
        }
        Ok(())
    }
}

/// A single leaderboard entry. Lower `playing_time_seconds` is better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTime {
    pub id: TopTimeId,
    pub game_mode: GameMode,
    #[serde(rename = "playing_time")]
    pub playing_time_seconds: u32,
    /// Display date, stored as entered.
    pub date: String,
}

impl TopTime {
    pub fn new(mode: GameMode, playing_time_seconds: u32, date: impl Into<String>) -> Self {
        Self {
            id: 0,
            game_mode: mode,
            playing_time_seconds,
            date: date.into(),
        }
    }
}

/// Outcome of one finished game, as reported by the game screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub mode: GameMode,
    pub won: bool,
    pub playing_time_seconds: u32,
    pub fields_uncovered: u32,
    /// Date shown on the leaderboard; today's local date when `None`.
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_more_wins_than_games() {
        let mut stats = GeneralStatistics::new(GameMode::Easy);
        stats.games_played = 2;
        stats.games_won = 2;
        assert!(stats.validate().is_ok());

        stats.games_won = 3;
        assert!(matches!(stats.validate(), Err(StatsError::InvalidRecord(_))));
    }

    #[test]
    fn test_serialized_names_match_columns() {
        let stats = GeneralStatistics::new(GameMode::Hard);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["game_mode"], "hard");
        assert_eq!(value["nr_of_played_games"], 0);
        assert_eq!(value["total_playing_time"], 0);

        let top = TopTime::new(GameMode::Easy, 42, "2024-05-01");
        let value = serde_json::to_value(&top).unwrap();
        assert_eq!(value["playing_time"], 42);
        assert_eq!(value["date"], "2024-05-01");
    }
}
