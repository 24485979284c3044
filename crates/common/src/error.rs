//! Common error types for infracheck.

use thiserror::Error;

/// Common error type for infracheck operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No specification could be obtained at all. Callers must treat this
    /// as "did not run", never as a run with failures.
    #[error("no specification could be obtained: {0}")]
    SpecUnavailable(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}
