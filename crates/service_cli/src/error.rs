//! CLI error types.

use raphson_core::types::RootFinderError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `raphson` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument value not understood.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Formula or solver settings rejected by the core.
    #[error(transparent)]
    Solve(#[from] RootFinderError),

    /// The run finished without finding a root.
    #[error("No root found: {0}")]
    NotConverged(String),

    /// Some problems of a batch failed.
    #[error("{failed} of {total} problems failed")]
    BatchFailed {
        /// Problems that errored or did not converge.
        failed: usize,
        /// Problems in the batch.
        total: usize,
    },

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
