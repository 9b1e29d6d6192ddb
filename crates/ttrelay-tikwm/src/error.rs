//! Internal error types for ttrelay-tikwm.

use thiserror::Error;

/// Result type alias for ttrelay-tikwm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for ttrelay-tikwm operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Client configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Response payload could not be parsed.
    #[error("malformed payload: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` if the error was caused by the request timeout elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Reqwest(e) if e.is_timeout())
    }
}
