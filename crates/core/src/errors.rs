//! Core error types for the eCollecto services.

use ecollecto_catalog_api::CatalogApiError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::tariffs::TariffError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the storefront services.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tariff operation failed: {0}")]
    Tariff(#[from] TariffError),

    #[error("Catalog operation failed: {0}")]
    Catalog(#[from] CatalogError),
}

impl Error {
    /// Whether the error was caused by a record that does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Tariff(e) => e.is_not_found(),
            Error::Catalog(CatalogError::NotFound { .. }) => true,
            Error::Catalog(CatalogError::Upstream(CatalogApiError::NotFound(_))) => true,
            _ => false,
        }
    }

    /// Whether retrying in a new request cycle could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Tariff(e) => e.is_transient(),
            Error::Catalog(CatalogError::Upstream(e)) => e.is_transient(),
            _ => false,
        }
    }
}
