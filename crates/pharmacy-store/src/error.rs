//! # Store Error Types
//!
//! Error types for remote store operations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────────┐  ┌─────────────────────┐ │
//! │  │  Configuration  │  │  Network failure    │  │  Response shape     │ │
//! │  │                 │  │                     │  │                     │ │
//! │  │  InvalidConfig  │  │  Network            │  │  MalformedResponse  │ │
//! │  │  InvalidUrl     │  │  Status (non-2xx)   │  │                     │ │
//! │  │  ClientBuild    │  │  Timeout            │  │                     │ │
//! │  │  ConfigLoad/Save│  │                     │  │                     │ │
//! │  └─────────────────┘  └─────────────────────┘  └─────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are retried. The desk surfaces network failures to the
//! operator and logs everything else.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Longest response body kept in a `Status` error.
const MAX_ERROR_BODY: usize = 200;

/// Remote store error type.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid store configuration.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Endpoint is not a usable URL.
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Failed to load the configuration file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save the configuration file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Network Errors
    // =========================================================================
    /// Request could not be sent or the connection dropped.
    #[error("Request to remote store failed: {0}")]
    Network(String),

    /// Remote store answered with a non-success status.
    #[error("Remote store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request exceeded the configured timeout.
    #[error("Request to remote store timed out")]
    Timeout,

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// Body did not have the expected shape.
    #[error("Malformed response from remote store: {0}")]
    MalformedResponse(String),
}

impl StoreError {
    /// Builds a `Status` error, keeping only the start of the body.
    pub fn status(status: u16, body: &str) -> Self {
        let body: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
        StoreError::Status { status, body }
    }

    /// Returns true if the request was rejected or never completed.
    ///
    /// These are the failures the operator is told about; configuration
    /// and response-shape problems are not.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            StoreError::Network(_) | StoreError::Status { .. } | StoreError::Timeout
        )
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else if err.is_decode() {
            StoreError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            StoreError::status(status.as_u16(), &err.to_string())
        } else {
            StoreError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        StoreError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::MalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_failure_classification() {
        assert!(StoreError::Network("connection refused".into()).is_network_failure());
        assert!(StoreError::status(500, "boom").is_network_failure());
        assert!(StoreError::Timeout.is_network_failure());

        assert!(!StoreError::MalformedResponse("eof".into()).is_network_failure());
        assert!(!StoreError::InvalidUrl("nope".into()).is_network_failure());
        assert!(!StoreError::ConfigLoadFailed("missing".into()).is_network_failure());
    }

    #[test]
    fn test_status_body_is_truncated() {
        let long = "x".repeat(1000);
        match StoreError::status(502, &long) {
            StoreError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), MAX_ERROR_BODY);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::status(404, "Not found");
        assert_eq!(err.to_string(), "Remote store returned HTTP 404: Not found");
    }
}
