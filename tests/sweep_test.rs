//! Sweep controller tests against scripted filter backends
//!
//! The backends here stand in for the external program: they record every
//! invocation and answer test invocations from a per-configuration script.

use amq_sweep::backend::{FilterBackend, RawOutput};
use amq_sweep::experiment::{ExperimentConfig, Metric, ResultsTable};
use amq_sweep::params::{memory_bytes, range_size, DerivedParams};
use amq_sweep::sweep::{run_experiment, run_sweep, SweepGrid};
use amq_sweep::{Error, Result};

/// Answers every test invocation via a closure and records the call log.
struct ScriptedBackend<F> {
    respond: F,
    log: Vec<(&'static str, ExperimentConfig)>,
}

impl<F: FnMut(&ExperimentConfig) -> String> ScriptedBackend<F> {
    fn new(respond: F) -> Self {
        Self {
            respond,
            log: Vec::new(),
        }
    }
}

impl<F: FnMut(&ExperimentConfig) -> String> FilterBackend for ScriptedBackend<F> {
    fn train(&mut self, config: &ExperimentConfig) -> Result<()> {
        self.log.push(("train", *config));
        Ok(())
    }

    fn test(&mut self, config: &ExperimentConfig) -> Result<RawOutput> {
        self.log.push(("test", *config));
        Ok(RawOutput::new((self.respond)(config)))
    }
}

fn report(fp: f64, time: f64) -> String {
    format!("loading filter\nfp rate is:{fp}\nquery time wall clock is{time},ms\n")
}

// =============================================================================
// End-to-end reference cell
// =============================================================================

#[test]
fn test_reference_cell_end_to_end() {
    let config = ExperimentConfig::new(1, 30, 20_000_000, 0.01).unwrap();
    let params = DerivedParams::for_config(&config);
    assert_eq!(params.k, 7);
    assert_eq!(params.range_size, 191_701_168);

    let mut backend = ScriptedBackend::new(|_| report(0.009, 12.5));
    let result = run_experiment(&mut backend, &config).unwrap();

    assert_eq!(result.fp_rate(), Some(0.009));
    assert_eq!(result.query_time_ms(), Some(12.5));
    assert!((result.memory_bytes() - 718_879_380.0).abs() < f64::EPSILON);
    assert_eq!(format!("{:.2}", result.memory_mb()), "685.58");
}

// =============================================================================
// Grid iteration
// =============================================================================

#[test]
fn test_sweep_full_grid_in_order() {
    let grid = SweepGrid {
        r_values: vec![1, 3],
        b_values: vec![30, 40],
        n_values: vec![1_000],
        p_values: vec![0.01, 0.2, 0.4],
    };
    let mut backend = ScriptedBackend::new(|c| report(c.p() / 2.0, f64::from(c.r())));
    let mut table = ResultsTable::new();

    let summary = run_sweep(&grid, &mut backend, &mut table).unwrap();

    assert_eq!(table.len(), grid.len());
    assert_eq!(summary.recorded(), 12);
    assert!(summary.skipped().is_empty());

    let order: Vec<(u32, u32, f64)> = table
        .iter()
        .map(|row| (row.config().r(), row.config().b(), row.config().p()))
        .collect();
    assert_eq!(order[0], (1, 30, 0.01));
    assert_eq!(order[2], (1, 30, 0.4));
    assert_eq!(order[3], (1, 40, 0.01));
    assert_eq!(order[6], (3, 30, 0.01));
    assert_eq!(order[11], (3, 40, 0.4));
}

#[test]
fn test_sweep_train_precedes_test_for_every_cell() {
    let grid = SweepGrid {
        r_values: vec![1, 5],
        b_values: vec![30],
        n_values: vec![100, 200],
        p_values: vec![0.2],
    };
    let mut backend = ScriptedBackend::new(|_| report(0.1, 1.0));
    let mut table = ResultsTable::new();
    run_sweep(&grid, &mut backend, &mut table).unwrap();

    assert_eq!(backend.log.len(), 2 * grid.len());
    for pair in backend.log.chunks(2) {
        assert_eq!(pair[0].0, "train");
        assert_eq!(pair[1].0, "test");
        assert_eq!(pair[0].1, pair[1].1);
    }
}

#[test]
fn test_sweep_memory_uses_derived_range_size() {
    let grid = SweepGrid {
        r_values: vec![3],
        b_values: vec![50],
        n_values: vec![20_000_000],
        p_values: vec![0.2],
    };
    let mut backend = ScriptedBackend::new(|_| report(0.2, 3.0));
    let mut table = ResultsTable::new();
    run_sweep(&grid, &mut backend, &mut table).unwrap();

    let expected = memory_bytes(3, 50, range_size(20_000_000, 0.2));
    let row = table.iter().next().unwrap();
    assert!((row.memory_bytes() - expected).abs() < f64::EPSILON);
}

// =============================================================================
// Partial failure
// =============================================================================

#[test]
fn test_sweep_skips_cells_without_fp_rate() {
    let grid = SweepGrid {
        r_values: vec![1, 3, 5, 7],
        b_values: vec![30],
        n_values: vec![1_000],
        p_values: vec![0.01, 0.2],
    };
    // R=5 runs out of memory in the external program
    let mut backend = ScriptedBackend::new(|c| {
        if c.r() == 5 {
            "std::bad_alloc\n".to_string()
        } else {
            report(0.1, 2.0)
        }
    });
    let mut table = ResultsTable::new();
    let summary = run_sweep(&grid, &mut backend, &mut table).unwrap();

    assert_eq!(table.len(), 6);
    assert!(table.iter().all(|row| row.config().r() != 5));
    assert_eq!(summary.skipped().len(), 2);
    assert!(summary.skipped().iter().all(|c| c.r() == 5));
    assert_eq!(table.repetition_values(), vec![1, 3, 7]);
}

#[test]
fn test_sweep_keeps_cell_with_missing_query_time() {
    let grid = SweepGrid {
        r_values: vec![1],
        b_values: vec![30],
        n_values: vec![1_000],
        p_values: vec![0.2],
    };
    let mut backend = ScriptedBackend::new(|_| "fp rate is:0.19\n".to_string());
    let mut table = ResultsTable::new();
    run_sweep(&grid, &mut backend, &mut table).unwrap();

    assert_eq!(table.len(), 1);
    assert!(table.curves(30, Metric::QueryTimeMs).is_empty());
    assert_eq!(table.curves(30, Metric::MemoryMb).len(), 1);
}

#[test]
fn test_sweep_non_finite_metrics_are_not_recorded() {
    let grid = SweepGrid {
        r_values: vec![1],
        b_values: vec![30],
        n_values: vec![1_000],
        p_values: vec![0.01, 0.2],
    };
    // 0/0 on an empty query set prints nan; a zero-length timer prints inf
    let mut backend = ScriptedBackend::new(|c| {
        if c.p() < 0.1 {
            "fp rate is:nan\nquery time wall clock is:1.5, cpu\n".to_string()
        } else {
            "fp rate is:0.19\nquery time wall clock is:inf, cpu\n".to_string()
        }
    });
    let mut table = ResultsTable::new();
    let summary = run_sweep(&grid, &mut backend, &mut table).unwrap();

    assert_eq!(summary.skipped().len(), 1);
    assert!((summary.skipped()[0].p() - 0.01).abs() < f64::EPSILON);
    assert_eq!(table.len(), 1);
    let row = table.iter().next().unwrap();
    assert_eq!(row.fp_rate(), Some(0.19));
    assert!(row.query_time_ms().is_none());
    assert!(table.curves(30, Metric::QueryTimeMs).is_empty());
}

#[test]
fn test_sweep_appends_to_existing_table() {
    let grid = SweepGrid {
        r_values: vec![1],
        b_values: vec![30],
        n_values: vec![1_000],
        p_values: vec![0.2],
    };
    let mut table = ResultsTable::new();
    for _ in 0..2 {
        let mut backend = ScriptedBackend::new(|_| report(0.2, 1.0));
        run_sweep(&grid, &mut backend, &mut table).unwrap();
    }
    assert_eq!(table.len(), 2);
}

// =============================================================================
// Failure propagation
// =============================================================================

struct UnlaunchableBackend;

impl FilterBackend for UnlaunchableBackend {
    fn train(&mut self, _config: &ExperimentConfig) -> Result<()> {
        Err(Error::Spawn {
            program: "./build/program".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        })
    }

    fn test(&mut self, _config: &ExperimentConfig) -> Result<RawOutput> {
        unreachable!("test must not run after a failed launch")
    }
}

#[test]
fn test_sweep_aborts_on_launch_failure() {
    let mut table = ResultsTable::new();
    let err = run_sweep(&SweepGrid::default(), &mut UnlaunchableBackend, &mut table).unwrap_err();
    assert!(matches!(err, Error::Spawn { .. }));
    assert!(table.is_empty());
}

#[test]
fn test_sweep_rejects_invalid_grid_before_running() {
    let grid = SweepGrid {
        n_values: vec![0],
        ..SweepGrid::default()
    };
    let mut backend = ScriptedBackend::new(|_| report(0.1, 1.0));
    let mut table = ResultsTable::new();

    let err = run_sweep(&grid, &mut backend, &mut table).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert!(backend.log.is_empty());
}
