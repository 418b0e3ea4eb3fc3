//! Filter sizing: parameter derivation and the theoretical memory model
//!
//! Standard Bloom-filter bounds:
//! - `k = ceil(-log2(p))` hash functions per inserted element
//! - `range_size = ceil(-(n * ln p) / (ln 2)^2)` bits per repetition-bucket
//!
//! All functions here require `n >= 1` and `0 < p < 1`. The precondition is
//! enforced once, when an [`ExperimentConfig`](crate::experiment::ExperimentConfig)
//! is built; these functions do not re-check it.

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use crate::experiment::ExperimentConfig;

/// Internal sizing knobs of the filter for a given `(n, p)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedParams {
    /// Number of hash functions.
    pub k: u32,
    /// Addressable bit positions per repetition-bucket.
    pub range_size: u64,
}

impl DerivedParams {
    /// Derive `k` and `range_size` for `n` elements at target false-positive rate `p`.
    #[must_use]
    pub fn derive(n: u64, p: f64) -> Self {
        Self {
            k: hash_count(p),
            range_size: range_size(n, p),
        }
    }

    /// Derive the parameters for a validated configuration.
    #[must_use]
    pub fn for_config(config: &ExperimentConfig) -> Self {
        Self::derive(config.n(), config.p())
    }
}

/// Number of hash functions: `ceil(-log2(p))`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hash_count(p: f64) -> u32 {
    (-p.log2()).ceil() as u32
}

/// Bits per repetition-bucket: `ceil(-(n * ln p) / (ln 2)^2)`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn range_size(n: u64, p: f64) -> u64 {
    (-(n as f64 * p.ln()) / (LN_2 * LN_2)).ceil() as u64
}

/// Theoretical footprint in bytes: `R * B * range_size / 8`.
///
/// Models R independent repetitions of B bit-array buckets. This is an
/// estimate; nothing is measured from the running filter program.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn memory_bytes(r: u32, b: u32, range_size: u64) -> f64 {
    f64::from(r) * f64::from(b) * range_size as f64 / 8.0
}

/// Convert bytes to mebibytes (the unit used in reports).
#[must_use]
pub fn bytes_to_mb(bytes: f64) -> f64 {
    bytes / 1024.0 / 1024.0
}
