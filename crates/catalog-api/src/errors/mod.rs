//! Error types for the catalog API client.

use thiserror::Error;

/// Errors that can occur while talking to the catalog backend.
#[derive(Error, Debug)]
pub enum CatalogApiError {
    /// The requested record does not exist on the backend.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered with a non-success HTTP status.
    #[error("Request to {endpoint} failed with status {status}")]
    HttpStatus {
        /// The endpoint path that was requested
        endpoint: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// The request did not complete within the configured timeout.
    #[error("Timeout: {endpoint}")]
    Timeout {
        /// The endpoint path that timed out
        endpoint: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode {
        /// The endpoint path whose body failed to decode
        endpoint: String,
        /// Decoder error message
        message: String,
    },

    /// The client configuration is unusable.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// A network error occurred while communicating with the backend.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl CatalogApiError {
    /// Whether a fresh request cycle could reasonably succeed.
    ///
    /// Timeouts, network failures, rate limiting and 5xx responses are
    /// transient. Everything else is a terminal answer from the backend or
    /// a local mistake. The client itself never retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Network(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::NotFound(_) | Self::Decode { .. } | Self::InvalidConfig(_) => false,
        }
    }

    /// Map a reqwest error raised while sending a request to `endpoint`.
    pub(crate) fn from_send(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else {
            Self::Network(err)
        }
    }
}
