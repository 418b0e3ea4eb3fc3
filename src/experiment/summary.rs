//! Sweep Summary - bookkeeping for one sweep execution

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ExperimentConfig;

/// Outcome counters and timestamps of one sweep.
///
/// Created when a sweep starts; `finish` stamps the end time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    total: usize,
    recorded: usize,
    skipped: Vec<ExperimentConfig>,
}

impl SweepSummary {
    /// Start a summary for a grid of `total` configurations.
    #[must_use]
    pub fn start(total: usize) -> Self {
        Self {
            started_at: Utc::now(),
            ended_at: None,
            total,
            recorded: 0,
            skipped: Vec::new(),
        }
    }

    /// Count a configuration whose result was appended to the table.
    pub fn record(&mut self) {
        self.recorded += 1;
    }

    /// Count a configuration skipped because its output did not parse.
    pub fn skip(&mut self, config: ExperimentConfig) {
        self.skipped.push(config);
    }

    /// Stamp the end time.
    pub fn finish(&mut self) {
        self.ended_at = Some(Utc::now());
    }

    /// Get the start timestamp.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Get the end timestamp, if the sweep has finished.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Number of configurations in the grid.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of configurations that produced a result.
    #[must_use]
    pub const fn recorded(&self) -> usize {
        self.recorded
    }

    /// Configurations skipped due to unparsable output, in grid order.
    #[must_use]
    pub fn skipped(&self) -> &[ExperimentConfig] {
        &self.skipped
    }

    /// Wall time between start and finish (or now, if still running).
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.ended_at.unwrap_or_else(Utc::now) - self.started_at
    }
}
