//! Application layer (use-cases, policies).
//!
//! Orchestrates domain logic on top of the store without depending on any
//! UI framework.

pub mod statistics;
