use super::aggregate::{StatisticsSummary, TopTimesPolicy, summarize};
use super::decode::{DecodeReport, decode_dump};
use crate::infra::db::Database;
use anyhow::{Context, Result};

/// Output of one background read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedStatistics {
    pub summary: StatisticsSummary,
    pub report: DecodeReport,
}

/// Reads the whole store off the async executor and turns it into summaries.
#[derive(Clone)]
pub struct StatisticsLoader {
    db: Database,
    policy: TopTimesPolicy,
}

impl StatisticsLoader {
    pub fn new(db: Database, policy: TopTimesPolicy) -> Self {
        Self { db, policy }
    }

    pub fn policy(&self) -> &TopTimesPolicy {
        &self.policy
    }

    /// Dump the database on a blocking worker, then decode and aggregate.
    ///
    /// Fails only when the read itself fails; decode problems are returned
    /// in the report alongside whatever could be aggregated.
    pub async fn load(&self) -> Result<LoadedStatistics> {
        let db = self.db.clone();
        let doc = tokio::task::spawn_blocking(move || db.dump())
            .await
            .context("statistics read task did not complete")?
            .context("failed to read statistics database")?;

        let decoded = decode_dump(&doc);
        Ok(LoadedStatistics {
            summary: summarize(&decoded.dump, &self.policy),
            report: decoded.report,
        })
    }
}
