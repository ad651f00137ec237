//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
///
/// Remote-call failures never appear here: they are folded into sentinel
/// results at the API boundary. What remains is local I/O and
/// serialization, surfaced only by the file-backed store.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
