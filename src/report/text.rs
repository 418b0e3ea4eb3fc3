//! Plain-text results summary

use std::fmt::Write as _;

use crate::experiment::{ExperimentResult, ResultsTable};

/// Header written above the result lines.
pub const HEADER: &str = "\nRAMBO Results:\n";

/// Format one result as
/// `R=<R>, B=<B>, n=<n>, p=<p>: FP=<fp>, Time=<t>ms, Mem=<mb>MB`.
///
/// Returns `None` for results without an FP rate. A missing query time is
/// written as `Time=n/a`.
#[must_use]
pub fn format_line(result: &ExperimentResult) -> Option<String> {
    let fp_rate = result.fp_rate()?;
    let time = result
        .query_time_ms()
        .map_or_else(|| "n/a".to_string(), |t| format!("{t:.4}ms"));
    Some(format!(
        "{}: FP={fp_rate:.4}, Time={time}, Mem={:.2}MB",
        result.config(),
        result.memory_mb()
    ))
}

/// Render the full summary file contents.
#[must_use]
pub fn render(table: &ResultsTable) -> String {
    let mut out = String::from(HEADER);
    for line in table.iter().filter_map(format_line) {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{line}");
    }
    out
}
