//! Results Table - ordered in-memory storage for sweep results
//!
//! Rows are kept in insertion order, which for a sweep is grid order
//! (R outermost, then B, then n, then p). Aggregation for charts groups
//! rows explicitly by key and never relies on that order.

use serde::{Deserialize, Serialize};

use super::ExperimentResult;

/// Which metric a chart curve plots against `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Theoretical memory footprint in MB.
    MemoryMb,
    /// Measured query wall-clock time in milliseconds.
    QueryTimeMs,
}

impl Metric {
    /// Extract this metric from a result, if it is available.
    #[must_use]
    pub fn value(self, result: &ExperimentResult) -> Option<f64> {
        match self {
            Self::MemoryMb => Some(result.memory_mb()),
            Self::QueryTimeMs => result.query_time_ms(),
        }
    }
}

/// One chart curve: a fixed `(R, B, n)` triple, points `(p, value)` in ascending `p`.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Repetition count this curve belongs to.
    pub r: u32,
    /// Element count this curve belongs to.
    pub n: u64,
    /// `(p, metric value)` points sorted by ascending `p`.
    pub points: Vec<(f64, f64)>,
}

/// Ordered sequence of experiment results.
///
/// No deduplication: appending a rerun with overlapping configurations adds
/// new rows instead of merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsTable {
    rows: Vec<ExperimentResult>,
}

impl ResultsTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Append a result.
    pub fn push(&mut self, result: ExperimentResult) {
        self.rows.push(result);
    }

    /// Iterate rows in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExperimentResult> {
        self.rows.iter()
    }

    /// Distinct bucket counts in first-seen order.
    #[must_use]
    pub fn bucket_values(&self) -> Vec<u32> {
        distinct(self.reportable().map(|row| row.config().b()))
    }

    /// Distinct repetition counts in first-seen order.
    #[must_use]
    pub fn repetition_values(&self) -> Vec<u32> {
        distinct(self.reportable().map(|row| row.config().r()))
    }

    /// Distinct element counts in first-seen order.
    #[must_use]
    pub fn element_values(&self) -> Vec<u64> {
        distinct(self.reportable().map(|row| row.config().n()))
    }

    /// Build one curve per distinct `(R, n)` pair for bucket count `b`.
    ///
    /// Curves come out R-major, then n, both in first-seen order. Keeping n in
    /// the key stops a multi-n sweep from folding several n into one line with
    /// repeated p values. Rows without an FP rate never contribute, and rows
    /// missing the requested metric are left out of their curve. Pairs with no
    /// remaining points for this `b` produce no curve.
    #[must_use]
    pub fn curves(&self, b: u32, metric: Metric) -> Vec<Curve> {
        let elements = self.element_values();
        self.repetition_values()
            .into_iter()
            .flat_map(|r| elements.iter().map(move |&n| (r, n)))
            .filter_map(|(r, n)| {
                let mut points: Vec<(f64, f64)> = self
                    .reportable()
                    .filter(|row| {
                        let config = row.config();
                        config.r() == r && config.b() == b && config.n() == n
                    })
                    .filter_map(|row| metric.value(row).map(|y| (row.config().p(), y)))
                    .collect();

                if points.is_empty() {
                    return None;
                }
                points.sort_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));
                Some(Curve { r, n, points })
            })
            .collect()
    }

    fn reportable(&self) -> impl Iterator<Item = &ExperimentResult> {
        self.rows.iter().filter(|row| row.is_reportable())
    }
}

impl Extend<ExperimentResult> for ResultsTable {
    fn extend<I: IntoIterator<Item = ExperimentResult>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ResultsTable {
    type Item = &'a ExperimentResult;
    type IntoIter = std::slice::Iter<'a, ExperimentResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn distinct<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::ExperimentConfig;

    fn row(r: u32, b: u32, p: f64, fp: Option<f64>, time: Option<f64>) -> ExperimentResult {
        row_n(r, b, 1_000, p, fp, time)
    }

    fn row_n(r: u32, b: u32, n: u64, p: f64, fp: Option<f64>, time: Option<f64>) -> ExperimentResult {
        let config = ExperimentConfig::new(r, b, n, p).unwrap();
        ExperimentResult::new(config, fp, time, 1_048_576.0 * f64::from(r))
    }

    #[test]
    fn test_table_default() {
        let table = ResultsTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.bucket_values().is_empty());
    }

    #[test]
    fn test_table_keeps_duplicates() {
        let mut table = ResultsTable::new();
        table.push(row(1, 30, 0.01, Some(0.01), Some(1.0)));
        table.push(row(1, 30, 0.01, Some(0.02), Some(2.0)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let mut table = ResultsTable::new();
        table.push(row(3, 40, 0.2, Some(0.1), Some(1.0)));
        table.push(row(1, 30, 0.2, Some(0.1), Some(1.0)));
        table.push(row(3, 30, 0.4, Some(0.1), Some(1.0)));

        assert_eq!(table.bucket_values(), vec![40, 30]);
        assert_eq!(table.repetition_values(), vec![3, 1]);
    }

    #[test]
    fn test_curves_sorted_by_p() {
        let mut table = ResultsTable::new();
        table.push(row(1, 30, 0.4, Some(0.3), Some(4.0)));
        table.push(row(1, 30, 0.01, Some(0.01), Some(1.0)));
        table.push(row(1, 30, 0.2, Some(0.1), Some(2.0)));

        let curves = table.curves(30, Metric::QueryTimeMs);
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].points, vec![(0.01, 1.0), (0.2, 2.0), (0.4, 4.0)]);
    }

    #[test]
    fn test_curves_group_by_key() {
        let mut table = ResultsTable::new();
        table.push(row(1, 30, 0.01, Some(0.01), Some(1.0)));
        table.push(row(3, 30, 0.01, Some(0.01), Some(3.0)));
        table.push(row(1, 40, 0.01, Some(0.01), Some(5.0)));

        let curves = table.curves(30, Metric::MemoryMb);
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].r, 1);
        assert_eq!(curves[0].points, vec![(0.01, 1.0)]);
        assert_eq!(curves[1].r, 3);
        assert_eq!(curves[1].points, vec![(0.01, 3.0)]);
    }

    #[test]
    fn test_curves_exclude_missing_values() {
        let mut table = ResultsTable::new();
        table.push(row(1, 30, 0.01, None, Some(1.0)));
        table.push(row(1, 30, 0.2, Some(0.1), None));

        assert!(table.curves(30, Metric::QueryTimeMs).is_empty());
        let memory = table.curves(30, Metric::MemoryMb);
        assert_eq!(memory.len(), 1);
        assert_eq!(memory[0].points.len(), 1);
    }

    #[test]
    fn test_curves_split_by_element_count() {
        let mut table = ResultsTable::new();
        for &n in &[1_000, 2_000] {
            for &p in &[0.01, 0.2] {
                table.push(row_n(1, 30, n, p, Some(p), Some(n as f64 * p)));
            }
        }
        table.push(row_n(3, 30, 2_000, 0.01, Some(0.01), Some(7.0)));

        assert_eq!(table.element_values(), vec![1_000, 2_000]);
        let curves = table.curves(30, Metric::QueryTimeMs);
        let keys: Vec<(u32, u64)> = curves.iter().map(|c| (c.r, c.n)).collect();
        assert_eq!(keys, vec![(1, 1_000), (1, 2_000), (3, 2_000)]);
        assert_eq!(curves[0].points, vec![(0.01, 10.0), (0.2, 200.0)]);
        assert_eq!(curves[1].points, vec![(0.01, 20.0), (0.2, 400.0)]);
        assert_eq!(curves[2].points, vec![(0.01, 7.0)]);
    }
}
