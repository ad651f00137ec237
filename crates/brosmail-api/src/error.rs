//! Error types for remote service calls.

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced at the HTTP boundary.
///
/// Most callers never see these directly: the high-level operations on
/// [`crate::ApiClient`] convert failures into sentinel results before they
/// reach application state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Response did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Returns true when the underlying failure was a client-side timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
