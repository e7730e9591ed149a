use std::path::PathBuf;
use thiserror::Error;

/// Error types for loading Gantry input.
///
/// The layout engine itself never fails; these only arise at the I/O boundary
/// where records and mappings are read from disk or stdin.
#[derive(Error, Debug)]
pub enum GantryError {
    /// Error opening or reading a file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error decoding JSON input
    #[error("Failed to parse {origin} (line {line}): {reason}")]
    Parse {
        origin: String,
        line: usize,
        reason: String,
    },

    /// A record entry that is not a JSON object
    #[error("Record at {origin} line {line} is not a JSON object")]
    InvalidRecord { origin: String, line: usize },

    /// An entry of a JSON array that is not an object (1-based index)
    #[error("Element {index} of {origin} is not a JSON object")]
    InvalidElement { origin: String, index: usize },

    /// Error with a field mapping file
    #[error("Invalid field mapping at {path}: {reason}")]
    InvalidMapping { path: PathBuf, reason: String },
}

impl GantryError {
    /// Get the full error message including the underlying cause.
    ///
    /// This is useful for displaying detailed error information to users.
    pub fn full_message(&self) -> String {
        match self {
            GantryError::Io { source, .. } => {
                format!("{} ({:?})", self, source.kind())
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for Gantry input operations
pub type GantryResult<T> = Result<T, GantryError>;
