//! Sweep controller
//!
//! Iterates the Cartesian product of the four configuration axes in nested
//! order (R outermost, then B, then n, then p innermost), drives the backend
//! for every cell and appends parsed results to a caller-owned table.
//!
//! Execution is strictly sequential: each cell's train phase completes before
//! its test phase, and each test phase completes before the next cell starts.

use serde::{Deserialize, Serialize};

use crate::backend::FilterBackend;
use crate::experiment::{ExperimentConfig, ExperimentResult, ResultsTable, SweepSummary};
use crate::params::{bytes_to_mb, memory_bytes, DerivedParams};
use crate::parser::parse_test_output;
use crate::{Error, Result};

/// Axis values of a sweep. Missing axes deserialize to the reference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepGrid {
    /// Repetition counts.
    pub r_values: Vec<u32>,
    /// Buckets per repetition.
    pub b_values: Vec<u32>,
    /// Elements per set.
    pub n_values: Vec<u64>,
    /// Target false-positive probabilities.
    pub p_values: Vec<f64>,
}

impl Default for SweepGrid {
    /// The reference run: `R in {1,3,5,7}`, `B in {30,40,50,60}`, `n = 2e7`, `p in {0.01,0.2,0.4}`.
    fn default() -> Self {
        Self {
            r_values: vec![1, 3, 5, 7],
            b_values: vec![30, 40, 50, 60],
            n_values: vec![20_000_000],
            p_values: vec![0.01, 0.2, 0.4],
        }
    }
}

impl SweepGrid {
    /// Number of cells in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.r_values.len() * self.b_values.len() * self.n_values.len() * self.p_values.len()
    }

    /// Whether the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand the grid into validated configurations in iteration order.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if an axis is empty or any cell is out
    /// of the derivation domain. Validation happens before anything runs.
    pub fn configs(&self) -> Result<Vec<ExperimentConfig>> {
        for (name, len) in [
            ("R", self.r_values.len()),
            ("B", self.b_values.len()),
            ("n", self.n_values.len()),
            ("p", self.p_values.len()),
        ] {
            if len == 0 {
                return Err(Error::InvalidConfig(format!("sweep axis {name} has no values")));
            }
        }

        let mut configs = Vec::with_capacity(self.len());
        for &r in &self.r_values {
            for &b in &self.b_values {
                for &n in &self.n_values {
                    for &p in &self.p_values {
                        configs.push(ExperimentConfig::new(r, b, n, p)?);
                    }
                }
            }
        }
        Ok(configs)
    }
}

/// Run one configuration: derive, train, test, parse, model memory.
///
/// Returns the result even when the FP rate is missing; deciding whether to
/// keep it is up to the caller.
///
/// # Errors
///
/// Propagates backend launch failures.
pub fn run_experiment<B: FilterBackend>(
    backend: &mut B,
    config: &ExperimentConfig,
) -> Result<ExperimentResult> {
    let params = DerivedParams::for_config(config);
    tracing::info!(k = params.k, range_size = params.range_size, %config, "derived filter parameters");

    backend.train(config)?;
    let output = backend.test(config)?;
    let metrics = parse_test_output(&output.stdout);

    let memory = memory_bytes(config.r(), config.b(), params.range_size);
    Ok(ExperimentResult::new(
        *config,
        metrics.fp_rate,
        metrics.query_time_ms,
        memory,
    ))
}

/// Run the whole grid, appending parsed results to `table`.
///
/// Configurations whose output has no FP rate are logged, listed in the
/// returned summary and not appended.
///
/// # Errors
///
/// Returns `Error::InvalidConfig` before running anything if the grid is
/// invalid, and propagates backend launch failures. Results appended before a
/// failure stay in `table`.
#[allow(clippy::cast_precision_loss)]
pub fn run_sweep<B: FilterBackend>(
    grid: &SweepGrid,
    backend: &mut B,
    table: &mut ResultsTable,
) -> Result<SweepSummary> {
    let configs = grid.configs()?;
    let total = configs.len();
    let mut summary = SweepSummary::start(total);

    tracing::info!(total, "starting sweep");

    for (index, config) in configs.iter().enumerate() {
        tracing::info!("Experiment {}/{}: {config}", index + 1, total);

        let result = run_experiment(backend, config)?;
        let Some(fp_rate) = result.fp_rate() else {
            tracing::warn!(%config, "skipping configuration: no parsable FP rate in test output");
            summary.skip(*config);
            continue;
        };

        let query_time = result
            .query_time_ms()
            .map_or_else(|| "n/a".to_string(), |t| format!("{t:.4}ms"));
        tracing::info!(
            "FP Rate: {fp_rate:.4}, Query Time: {query_time}, Memory: {:.2}MB",
            bytes_to_mb(result.memory_bytes())
        );
        table.push(result);
        summary.record();
    }

    summary.finish();
    tracing::info!(
        recorded = summary.recorded(),
        skipped = summary.skipped().len(),
        elapsed_secs = summary.elapsed().num_milliseconds() as f64 / 1000.0,
        "sweep finished"
    );
    Ok(summary)
}
