//! # amq-sweep: Parameter Sweeps for External AMQ Filters
//!
//! amq-sweep drives a prebuilt approximate-membership-query filter program
//! (a RAMBO-style array of Bloom filters, parameterised by repetitions R,
//! buckets per repetition B, elements per set n and target false-positive
//! rate p) across a grid of configurations, and aggregates what it reports.
//!
//! ## Pipeline
//!
//! ```text
//! params (k, range_size) ─┐
//! backend: train ──> test ┼─> parser (fp rate, query time) ──> sweep ──> report
//! params::memory_bytes ───┘                                  (ResultsTable)
//! ```
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke**: configurations are validated before the first subprocess runs
//! - **Jidoka**: unparsable output stops at one seam (`parser`) and the cell is skipped
//! - **Genchi Genbutsu**: every reported FP rate and latency is the program's own measurement
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use amq_sweep::backend::ProcessBackend;
//! use amq_sweep::experiment::ResultsTable;
//! use amq_sweep::report::Reporter;
//! use amq_sweep::sweep::{run_sweep, SweepGrid};
//!
//! let mut backend = ProcessBackend::new("./build/program");
//! let mut table = ResultsTable::new();
//! let summary = run_sweep(&SweepGrid::default(), &mut backend, &mut table)?;
//!
//! println!("{} of {} configurations recorded", summary.recorded(), summary.total());
//! Reporter::default().write(&table)?;
//! # Ok::<(), amq_sweep::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod backend;
pub mod config;
pub mod error;
pub mod experiment;
pub mod params;
pub mod parser;
pub mod report;
pub mod sweep;

pub use error::{Error, Result};
