//! Error types for the TUI module.

use std::io;
use thiserror::Error;

use gantry_core::GantryError;

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Failed to initialize or restore the terminal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Records or mapping could not be loaded.
    #[error(transparent)]
    Input(#[from] GantryError),
}

impl TuiError {
    /// Message shown to users on failure.
    pub fn full_message(&self) -> String {
        match self {
            TuiError::Input(err) => err.full_message(),
            other => other.to_string(),
        }
    }
}
