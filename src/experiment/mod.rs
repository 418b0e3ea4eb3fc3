//! Experiment data model
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentConfig (R, B, n, p) ──> ExperimentResult ──< ResultsTable
//!                                                        │
//!                                   SweepSummary ────────┘ (counts, skips, timing)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use amq_sweep::experiment::{ExperimentConfig, ExperimentResult, Metric, ResultsTable};
//!
//! let config = ExperimentConfig::new(1, 30, 20_000_000, 0.01)?;
//!
//! let mut table = ResultsTable::new();
//! table.push(ExperimentResult::new(config, Some(0.009), Some(12.5), 718_879_380.0));
//!
//! let curves = table.curves(30, Metric::QueryTimeMs);
//! assert_eq!(curves[0].points, vec![(0.01, 12.5)]);
//! # Ok::<(), amq_sweep::Error>(())
//! ```

mod config;
mod result;
mod summary;
mod table;

pub use config::ExperimentConfig;
pub use result::ExperimentResult;
pub use summary::SweepSummary;
pub use table::{Curve, Metric, ResultsTable};
