//! Error types for amq-sweep
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)
//!
//! Parse failures of the filter program's output are deliberately absent here:
//! they surface as missing metrics and the sweep skips the configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// amq-sweep error types
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration outside the derivation domain (p not in (0,1), zero R/B/n, empty axis)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The external filter program could not be launched
    #[error("Failed to launch filter program {program}: {source}\nCheck that the program is built and executable")]
    Spawn {
        /// Program path as configured
        program: PathBuf,
        /// Underlying launch failure
        #[source]
        source: std::io::Error,
    },

    /// Sweep configuration file could not be used
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chart rendering failed
    #[error("Plot error: {0}")]
    Plot(String),

    /// JSON encoding/decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
