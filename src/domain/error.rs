//! Domain error types for the statistics store.
//!
//! Infrastructure failures travel as `anyhow::Error` and are wrapped into
//! `OperationFailed` when they cross into domain-level APIs.

use thiserror::Error;

/// Errors raised by statistics operations.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Statistics record not found: {0}")]
    NotFound(String),

    #[error("Invalid statistics record: {0}")]
    InvalidRecord(String),

    #[error("Statistics operation failed: {0}")]
    OperationFailed(#[from] anyhow::Error),
}

/// A single problem found while decoding the database dump.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing field `{field}` in {location}")]
    Missing { location: String, field: String },

    #[error("malformed field `{field}` in {location}: {reason}")]
    Malformed {
        location: String,
        field: String,
        reason: String,
    },
}

impl FieldError {
    pub fn missing(location: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Missing {
            location: location.into(),
            field: field.into(),
        }
    }

    pub fn malformed(
        location: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            location: location.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field, .. } | Self::Malformed { field, .. } => field,
        }
    }
}
