//! Experiment Config - one cell of the sweep grid

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single filter configuration `(R, B, n, p)`.
///
/// Construction validates the derivation domain, so every instance satisfies
/// `R >= 1`, `B >= 1`, `n >= 1` and `0 < p < 1`. Deserialization goes through
/// the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedConfig")]
pub struct ExperimentConfig {
    r: u32,
    b: u32,
    n: u64,
    p: f64,
}

impl ExperimentConfig {
    /// Create a validated configuration.
    ///
    /// # Arguments
    ///
    /// * `r` - Repetition count
    /// * `b` - Buckets per repetition
    /// * `n` - Elements per set
    /// * `p` - Target false-positive probability
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if any count is zero or `p` is not
    /// strictly inside `(0, 1)`.
    pub fn new(r: u32, b: u32, n: u64, p: f64) -> Result<Self> {
        if r == 0 {
            return Err(Error::InvalidConfig(
                "repetition count R must be at least 1".to_string(),
            ));
        }
        if b == 0 {
            return Err(Error::InvalidConfig(
                "bucket count B must be at least 1".to_string(),
            ));
        }
        if n == 0 {
            return Err(Error::InvalidConfig(
                "elements per set n must be at least 1".to_string(),
            ));
        }
        // NaN fails both comparisons
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "false-positive probability p must be in (0, 1), got {p}"
            )));
        }
        Ok(Self { r, b, n, p })
    }

    /// Get the repetition count.
    #[must_use]
    pub const fn r(&self) -> u32 {
        self.r
    }

    /// Get the buckets per repetition.
    #[must_use]
    pub const fn b(&self) -> u32 {
        self.b
    }

    /// Get the elements per set.
    #[must_use]
    pub const fn n(&self) -> u64 {
        self.n
    }

    /// Get the target false-positive probability.
    #[must_use]
    pub const fn p(&self) -> f64 {
        self.p
    }
}

impl fmt::Display for ExperimentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R={}, B={}, n={}, p={}", self.r, self.b, self.n, self.p)
    }
}

#[derive(Deserialize)]
struct UncheckedConfig {
    r: u32,
    b: u32,
    n: u64,
    p: f64,
}

impl TryFrom<UncheckedConfig> for ExperimentConfig {
    type Error = Error;

    fn try_from(raw: UncheckedConfig) -> Result<Self> {
        Self::new(raw.r, raw.b, raw.n, raw.p)
    }
}
