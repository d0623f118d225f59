//! Error types for pr-sweep

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by pr-sweep
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is incomplete
    #[error("configuration error: {0}")]
    Config(String),

    /// A checkout's remote URL is missing or malformed
    #[error("failed to resolve remote target: {0}")]
    Resolve(String),

    /// The remote API rejected a request or was unreachable
    #[error("API error: {0}")]
    Api(String),

    /// A merge was rejected because the pull request version is stale
    #[error("stale pull request version: {0}")]
    StaleVersion(String),

    /// A remote call exceeded the configured deadline
    #[error("request timed out: {0}")]
    Timeout(String),

    /// A response body did not match the expected shape
    #[error("malformed API response: {0}")]
    Deserialize(String),

    /// Terminal or prompt plumbing failed
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_decode() {
            Self::Deserialize(e.to_string())
        } else {
            Self::Api(e.to_string())
        }
    }
}
