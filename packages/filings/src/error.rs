//! Error types for filing search and extraction.

use thiserror::Error;

/// Main error type for the filings library.
#[derive(Debug, Error)]
pub enum FilingError {
    /// A required request parameter was missing or empty.
    #[error("{0}")]
    MissingParameters(&'static str),

    /// HTTP request failed (connect, timeout, or non-2xx status).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Filing markup could not be parsed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for filing operations.
pub type Result<T> = std::result::Result<T, FilingError>;
