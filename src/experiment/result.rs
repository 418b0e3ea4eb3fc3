//! Experiment Result - measured and modelled metrics for one configuration

use serde::{Deserialize, Serialize};

use super::ExperimentConfig;
use crate::params::bytes_to_mb;

/// Metrics gathered for one sweep cell.
///
/// `fp_rate` and `query_time_ms` come from the filter program's test output and
/// are `None` when the corresponding line could not be parsed. `memory_bytes`
/// is the theoretical footprint and is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    config: ExperimentConfig,
    fp_rate: Option<f64>,
    query_time_ms: Option<f64>,
    memory_bytes: f64,
}

impl ExperimentResult {
    /// Create a new result record.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration the metrics belong to
    /// * `fp_rate` - Measured false-positive rate, if parsed
    /// * `query_time_ms` - Measured query wall-clock time, if parsed
    /// * `memory_bytes` - Theoretical memory footprint
    #[must_use]
    pub const fn new(
        config: ExperimentConfig,
        fp_rate: Option<f64>,
        query_time_ms: Option<f64>,
        memory_bytes: f64,
    ) -> Self {
        Self {
            config,
            fp_rate,
            query_time_ms,
            memory_bytes,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Get the measured false-positive rate, if any.
    #[must_use]
    pub const fn fp_rate(&self) -> Option<f64> {
        self.fp_rate
    }

    /// Get the measured query time in milliseconds, if any.
    #[must_use]
    pub const fn query_time_ms(&self) -> Option<f64> {
        self.query_time_ms
    }

    /// Get the theoretical memory footprint in bytes.
    #[must_use]
    pub const fn memory_bytes(&self) -> f64 {
        self.memory_bytes
    }

    /// Get the theoretical memory footprint in MB (1024 * 1024 bytes).
    #[must_use]
    pub fn memory_mb(&self) -> f64 {
        bytes_to_mb(self.memory_bytes)
    }

    /// Whether this result may appear in reports (its FP rate was parsed).
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        self.fp_rate.is_some()
    }
}
