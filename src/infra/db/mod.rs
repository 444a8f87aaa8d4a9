//! SQLite persistence (infrastructure).

pub mod database;
pub mod dump;
pub mod repository;

pub use database::Database;
pub use repository::{GeneralStatisticsRepository, TopTimeRepository};
