//! Result reporting
//!
//! Writes a finished [`ResultsTable`] into a results directory:
//! - a plain-text summary (one formatted line per result)
//! - a JSON dump of the table
//! - one PNG of grouped charts
//!
//! The directory is created if absent. Any I/O or rendering failure aborts
//! reporting; files written before the failure are left in place.

mod plot;
pub mod text;

pub use plot::render_charts;

use std::fs;
use std::path::{Path, PathBuf};

use crate::experiment::ResultsTable;
use crate::Result;

/// Default results directory.
pub const DEFAULT_RESULTS_DIR: &str = "rambo_analysis";
/// Default text summary file name.
pub const DEFAULT_TEXT_FILE: &str = "results_p.txt";
/// Default JSON dump file name.
pub const DEFAULT_JSON_FILE: &str = "results_p.json";
/// Default chart file name.
pub const DEFAULT_PLOT_FILE: &str = "rambo_analysis_p.png";

/// Files produced by a [`Reporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Text summary.
    pub text: PathBuf,
    /// JSON dump.
    pub json: PathBuf,
    /// Chart image, if charts were rendered.
    pub plot: Option<PathBuf>,
}

/// Persists results under a fixed directory.
#[derive(Debug, Clone)]
pub struct Reporter {
    results_dir: PathBuf,
    text_file: String,
    json_file: String,
    plot_file: String,
    plot: bool,
}

impl Reporter {
    /// Create a reporter writing into `results_dir` with the default file names.
    #[must_use]
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            text_file: DEFAULT_TEXT_FILE.to_string(),
            json_file: DEFAULT_JSON_FILE.to_string(),
            plot_file: DEFAULT_PLOT_FILE.to_string(),
            plot: true,
        }
    }

    /// Set the text summary file name.
    #[must_use]
    pub fn text_file(mut self, name: impl Into<String>) -> Self {
        self.text_file = name.into();
        self
    }

    /// Set the JSON dump file name.
    #[must_use]
    pub fn json_file(mut self, name: impl Into<String>) -> Self {
        self.json_file = name.into();
        self
    }

    /// Set the chart file name.
    #[must_use]
    pub fn plot_file(mut self, name: impl Into<String>) -> Self {
        self.plot_file = name.into();
        self
    }

    /// Enable or disable chart rendering.
    #[must_use]
    pub const fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }

    /// Get the results directory.
    #[must_use]
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Write every report for `table`.
    ///
    /// Charts are skipped (with a warning) when the table has nothing
    /// reportable, since there is no curve to draw.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the directory or a file cannot be written,
    /// `Error::Serialization` if the JSON dump fails, and `Error::Plot` if the
    /// charts cannot be rendered.
    pub fn write(&self, table: &ResultsTable) -> Result<ReportPaths> {
        fs::create_dir_all(&self.results_dir)?;

        let text = self.results_dir.join(&self.text_file);
        fs::write(&text, text::render(table))?;
        tracing::info!(path = %text.display(), rows = table.len(), "wrote text summary");

        let json = self.results_dir.join(&self.json_file);
        fs::write(&json, serde_json::to_string_pretty(table)?)?;
        tracing::info!(path = %json.display(), "wrote JSON results");

        let plot = if !self.plot {
            None
        } else if table.bucket_values().is_empty() {
            tracing::warn!("no reportable results; skipping charts");
            None
        } else {
            let path = self.results_dir.join(&self.plot_file);
            render_charts(table, &path)?;
            tracing::info!(path = %path.display(), "wrote charts");
            Some(path)
        };

        Ok(ReportPaths { text, json, plot })
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_DIR)
    }
}

/// Load a table previously written as JSON by [`Reporter::write`].
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read and `Error::Serialization`
/// if it is not a valid results dump.
pub fn load_json(path: &Path) -> Result<ResultsTable> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
