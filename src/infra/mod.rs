//! Infrastructure layer (adapters/implementations).
//!
//! SQLite storage and the on-disk configuration file.

pub mod app_config;
pub mod db;
