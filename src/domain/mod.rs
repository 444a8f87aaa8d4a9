//! Domain types for the statistics subsystem.
//! Game modes, persisted statistics records and domain errors.

pub mod error;
pub mod game_mode;
pub mod statistics;

pub use error::{FieldError, StatsError};
pub use game_mode::GameMode;
pub use statistics::{GameResult, GeneralStatistics, GeneralStatisticsId, TopTime, TopTimeId};
