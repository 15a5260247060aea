use ecollecto_catalog_api::CatalogApiError;
use thiserror::Error;

/// Errors raised while loading or querying tariffs.
///
/// `Clone` so that every caller waiting on a shared fetch receives the same
/// failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TariffError {
    #[error("Failed to load tariffs: {message}")]
    FetchFailed { message: String, transient: bool },

    #[error("Tariff fetch was aborted: {0}")]
    FetchAborted(String),

    #[error("No tariffs are available")]
    Unavailable,

    #[error("No tariffs for year {0}")]
    YearNotFound(i32),

    #[error("No tariffs for currency {0}")]
    CurrencyNotFound(String),

    #[error("No tariff for code {code} in {currency}")]
    CodeNotFound { currency: String, code: String },
}

impl TariffError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TariffError::Unavailable
                | TariffError::YearNotFound(_)
                | TariffError::CurrencyNotFound(_)
                | TariffError::CodeNotFound { .. }
        )
    }

    pub fn is_transient(&self) -> bool {
        match self {
            TariffError::FetchFailed { transient, .. } => *transient,
            TariffError::FetchAborted(_) => true,
            _ => false,
        }
    }
}

impl From<CatalogApiError> for TariffError {
    fn from(err: CatalogApiError) -> Self {
        TariffError::FetchFailed {
            transient: err.is_transient(),
            message: err.to_string(),
        }
    }
}
