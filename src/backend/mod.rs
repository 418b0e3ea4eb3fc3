//! Filter backends
//!
//! A backend runs the external AMQ filter for one configuration in two phases:
//! `train` builds and persists the filter, `test` queries it and returns the
//! program's raw report. The sweep only sequences the two calls; any state
//! between them lives wherever the backend keeps it.
//!
//! Exit status does not influence the sweep. A failed train is treated as
//! trained, and a hanging test blocks the caller (no timeout).

mod process;

pub use process::ProcessBackend;

use crate::experiment::ExperimentConfig;
use crate::Result;

/// Mode selector passed as the first positional argument (reserved, always `0`).
pub const MODE: &str = "0";

/// Invocation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Build and persist the filter.
    Train,
    /// Query the persisted filter and report metrics.
    Test,
}

impl Phase {
    /// Value of the train flag argument for this phase.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Train => "1",
            Self::Test => "0",
        }
    }
}

/// Positional arguments `[mode, R, B, n, trainFlag, p]` for one invocation.
#[must_use]
pub fn invocation_args(config: &ExperimentConfig, phase: Phase) -> [String; 6] {
    [
        MODE.to_string(),
        config.r().to_string(),
        config.b().to_string(),
        config.n().to_string(),
        phase.flag().to_string(),
        config.p().to_string(),
    ]
}

/// Captured output of a test invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    /// Full standard output.
    pub stdout: String,
    /// Exit code, `None` when terminated by a signal or unknown.
    pub exit_code: Option<i32>,
}

impl RawOutput {
    /// Output from a successful run.
    #[must_use]
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            exit_code: Some(0),
        }
    }
}

/// Capability to train and test the external filter for a configuration.
pub trait FilterBackend {
    /// Run the train phase to completion. Its output is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error only if the phase could not be started at all.
    fn train(&mut self, config: &ExperimentConfig) -> Result<()>;

    /// Run the test phase to completion and return its captured output.
    ///
    /// # Errors
    ///
    /// Returns an error only if the phase could not be started at all.
    fn test(&mut self, config: &ExperimentConfig) -> Result<RawOutput>;
}

impl<T: FilterBackend + ?Sized> FilterBackend for &mut T {
    fn train(&mut self, config: &ExperimentConfig) -> Result<()> {
        (**self).train(config)
    }

    fn test(&mut self, config: &ExperimentConfig) -> Result<RawOutput> {
        (**self).test(config)
    }
}
