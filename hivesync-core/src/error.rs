//! Error types for hivesync-core

use thiserror::Error;

/// Main error type for the hivesync-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connection refused, DNS, TLS, dropped socket)
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded its deadline without settling
    #[error("API request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The server answered with a `success: false` envelope
    #[error("server error: {message}")]
    Server { message: String },

    /// Client-side validation rejected the operation before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify a reqwest failure into the transport taxonomy.
    ///
    /// Timeouts get their own variant so callers can tell a hung endpoint
    /// apart from an unreachable one.
    pub(crate) fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Error::Timeout { secs: timeout_secs }
        } else {
            Error::Network(err.to_string())
        }
    }
}

/// Result type alias for hivesync-core
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Timeout { secs: 10 };
        assert_eq!(err.to_string(), "API request timed out after 10s");

        let err = Error::Server {
            message: "Sheet not found".to_string(),
        };
        assert_eq!(err.to_string(), "server error: Sheet not found");

        let err = Error::Validation("no apiary selected".to_string());
        assert!(err.to_string().contains("no apiary selected"));
    }
}
