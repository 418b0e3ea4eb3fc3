//! Test-phase output parser
//!
//! The filter program reports its measurements as free-form text lines:
//!
//! ```text
//! fp rate is:0.0123
//! query time wall clock is:45.67, cpu time is: ...
//! ```
//!
//! Every line is scanned and the last matching line wins. A field whose marker
//! never appears, or whose value is not a finite number, is `None`; the sweep treats a
//! missing FP rate as an unparsable configuration.

/// Marker of the false-positive rate line.
pub const FP_RATE_MARKER: &str = "fp rate is:";

/// Marker of the query wall-clock time line.
pub const QUERY_TIME_MARKER: &str = "query time wall clock is";

/// Metrics extracted from one test-phase output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParsedMetrics {
    /// Measured false-positive rate.
    pub fp_rate: Option<f64>,
    /// Measured query wall-clock time in milliseconds.
    pub query_time_ms: Option<f64>,
}

/// Parse the test-phase output of the filter program.
///
/// # Example
///
/// ```rust
/// use amq_sweep::parser::parse_test_output;
///
/// let metrics = parse_test_output("fp rate is:0.1234\nquery time wall clock is5.6789,ms\n");
/// assert_eq!(metrics.fp_rate, Some(0.1234));
/// assert_eq!(metrics.query_time_ms, Some(5.6789));
/// ```
#[must_use]
pub fn parse_test_output(output: &str) -> ParsedMetrics {
    let mut metrics = ParsedMetrics::default();

    for line in output.lines() {
        if line.contains(FP_RATE_MARKER) {
            metrics.fp_rate = parse_fp_rate(line);
        }
        if line.contains(QUERY_TIME_MARKER) {
            metrics.query_time_ms = parse_query_time(line);
        }
    }

    metrics
}

/// Trailing colon-delimited field of an FP rate line.
fn parse_fp_rate(line: &str) -> Option<f64> {
    let field = line.rsplit(':').next().unwrap_or(line);
    parse_number(field, line)
}

/// Field between the first colon and the following comma of a query time line.
///
/// Some builds print no colon after the marker (`... clock is5.6789,ms`); the
/// field then starts right after the marker.
fn parse_query_time(line: &str) -> Option<f64> {
    let tail = match line.split_once(':') {
        Some((_, rest)) => rest,
        None => line
            .split_once(QUERY_TIME_MARKER)
            .map_or(line, |(_, rest)| rest),
    };
    let field = tail.split(',').next().unwrap_or(tail);
    parse_number(field, line)
}

/// `inf` and `nan` parse as `f64` but are not measurements.
fn parse_number(field: &str, line: &str) -> Option<f64> {
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(value) => {
            tracing::debug!(line, value, "marker line has a non-finite value");
            None
        }
        Err(e) => {
            tracing::debug!(line, error = %e, "marker line has no numeric value");
            None
        }
    }
}
