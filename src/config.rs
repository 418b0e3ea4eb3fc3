//! Sweep configuration
//!
//! Every field defaults to the reference run, so an empty JSON object (or no
//! file at all) reproduces it. The CLI applies its overrides on top.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backend::ProcessBackend;
use crate::report::{
    Reporter, DEFAULT_JSON_FILE, DEFAULT_PLOT_FILE, DEFAULT_RESULTS_DIR, DEFAULT_TEXT_FILE,
};
use crate::sweep::SweepGrid;
use crate::{Error, Result};

/// Default path of the prebuilt filter program.
pub const DEFAULT_PROGRAM: &str = "./build/program";

/// Complete configuration of one sweep run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Filter program to drive.
    pub program: PathBuf,
    /// Working directory for the program (current directory if unset).
    pub working_dir: Option<PathBuf>,
    /// Axis values.
    #[serde(flatten)]
    pub grid: SweepGrid,
    /// Output directory.
    pub results_dir: PathBuf,
    /// Text summary file name.
    pub text_file: String,
    /// JSON dump file name.
    pub json_file: String,
    /// Chart file name.
    pub plot_file: String,
    /// Whether to render charts.
    pub plot: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            working_dir: None,
            grid: SweepGrid::default(),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            text_file: DEFAULT_TEXT_FILE.to_string(),
            json_file: DEFAULT_JSON_FILE.to_string(),
            plot_file: DEFAULT_PLOT_FILE.to_string(),
            plot: true,
        }
    }
}

impl SweepConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read or parsed, and
    /// `Error::InvalidConfig` if the resulting grid is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every grid cell is a valid configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for empty axes or out-of-domain values.
    pub fn validate(&self) -> Result<()> {
        self.grid.configs().map(|_| ())
    }

    /// Build the subprocess backend described by this configuration.
    #[must_use]
    pub fn backend(&self) -> ProcessBackend {
        let backend = ProcessBackend::new(&self.program);
        match &self.working_dir {
            Some(dir) => backend.working_dir(dir),
            None => backend,
        }
    }

    /// Build the reporter described by this configuration.
    #[must_use]
    pub fn reporter(&self) -> Reporter {
        Reporter::new(&self.results_dir)
            .text_file(&self.text_file)
            .json_file(&self.json_file)
            .plot_file(&self.plot_file)
            .with_plot(self.plot)
    }
}
