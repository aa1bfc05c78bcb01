//! Common error types for Felix

use thiserror::Error;

/// Common result type for Felix operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Felix crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP client error (wraps reqwest::Error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dashboard answered an analysis submission with a non-OK status
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
