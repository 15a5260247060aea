//! Client configuration.

use std::time::Duration;

use crate::errors::CatalogApiError;

/// Environment variable holding the catalog backend base URL.
pub const API_URL_ENV: &str = "ECOLLECTO_API_URL";
/// Environment variable holding the request timeout in milliseconds.
pub const API_TIMEOUT_ENV: &str = "ECOLLECTO_API_TIMEOUT_MS";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Connection settings for [`CatalogApiClient`](crate::CatalogApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration, trimming any trailing slash from the base URL.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            request_timeout,
        }
    }

    /// Read the configuration from `ECOLLECTO_API_URL` and `ECOLLECTO_API_TIMEOUT_MS`.
    ///
    /// A missing or unparsable timeout falls back to 30 seconds.
    pub fn from_env() -> Result<Self, CatalogApiError> {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_ms = std::env::var(API_TIMEOUT_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let config = Self::new(base_url, Duration::from_millis(timeout_ms));
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the client cannot work with.
    pub fn validate(&self) -> Result<(), CatalogApiError> {
        if self.base_url.is_empty() {
            return Err(CatalogApiError::InvalidConfig(
                "base URL must not be empty".to_string(),
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CatalogApiError::InvalidConfig(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}
