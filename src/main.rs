//! amq-sweep command line
//!
//! ```text
//! amq-sweep                                   # reference run with ./build/program
//! amq-sweep --config sweep.json --no-plot
//! amq-sweep --r 1,3 --b 30 --p 0.01,0.2 --results-dir out
//! RUST_LOG=amq_sweep=debug amq-sweep          # show derived k / range_size per cell
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use amq_sweep::config::SweepConfig;
use amq_sweep::experiment::ResultsTable;
use amq_sweep::sweep::run_sweep;

/// Sweep an external AMQ filter program over (R, B, n, p) and report the results
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON sweep configuration; missing fields take the reference-run defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Filter program to drive
    #[arg(long)]
    program: Option<PathBuf>,

    /// Working directory for the filter program
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Directory for the text, JSON and chart outputs
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Repetition counts (comma separated)
    #[arg(long, value_delimiter = ',')]
    r: Option<Vec<u32>>,

    /// Buckets per repetition (comma separated)
    #[arg(long, value_delimiter = ',')]
    b: Option<Vec<u32>>,

    /// Elements per set (comma separated)
    #[arg(long, value_delimiter = ',')]
    n: Option<Vec<u64>>,

    /// Target false-positive probabilities (comma separated)
    #[arg(long, value_delimiter = ',')]
    p: Option<Vec<f64>>,

    /// Skip chart rendering
    #[arg(long)]
    no_plot: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

impl Args {
    fn into_config(self) -> Result<SweepConfig> {
        let mut config = match &self.config {
            Some(path) => SweepConfig::from_file(path)
                .with_context(|| format!("loading sweep configuration {}", path.display()))?,
            None => SweepConfig::default(),
        };

        if let Some(program) = self.program {
            config.program = program;
        }
        if let Some(dir) = self.working_dir {
            config.working_dir = Some(dir);
        }
        if let Some(dir) = self.results_dir {
            config.results_dir = dir;
        }
        if let Some(r) = self.r {
            config.grid.r_values = r;
        }
        if let Some(b) = self.b {
            config.grid.b_values = b;
        }
        if let Some(n) = self.n {
            config.grid.n_values = n;
        }
        if let Some(p) = self.p {
            config.grid.p_values = p;
        }
        if self.no_plot {
            config.plot = false;
        }

        config.validate().context("invalid sweep grid")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("amq_sweep=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let dump = args.dump_config;
    let config = args.into_config()?;

    if dump {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    tracing::info!(
        program = %config.program.display(),
        experiments = config.grid.len(),
        results_dir = %config.results_dir.display(),
        "Starting experiments"
    );

    let mut backend = config.backend();
    let mut table = ResultsTable::new();
    let summary = run_sweep(&config.grid, &mut backend, &mut table)
        .with_context(|| format!("sweep aborted after {} recorded results", table.len()))?;

    let paths = config
        .reporter()
        .write(&table)
        .context("writing results")?;

    for skipped in summary.skipped() {
        tracing::warn!(config = %skipped, "skipped");
    }
    println!(
        "Total time: {:.2} seconds",
        summary.elapsed().num_milliseconds() as f64 / 1000.0
    );
    println!(
        "Recorded {}/{} configurations, results saved in: {}",
        summary.recorded(),
        summary.total(),
        config.results_dir.display()
    );
    if let Some(plot) = paths.plot {
        println!("Charts: {}", plot.display());
    }

    Ok(())
}
