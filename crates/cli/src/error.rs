//! Error types for the CLI.

use std::path::PathBuf;
use thiserror::Error;

use gantry_core::GantryError;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Error type for CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to load records or the mapping.
    #[error(transparent)]
    Input(#[from] GantryError),

    /// Failed to encode command output as JSON.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failed to write the output file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Message shown to users on failure.
    pub fn full_message(&self) -> String {
        match self {
            CliError::Input(err) => err.full_message(),
            other => other.to_string(),
        }
    }
}
