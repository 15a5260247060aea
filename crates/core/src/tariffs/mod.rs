//! Tariffs module - yearly tariff tables, cache, and denomination pricing.
//!
//! ```text
//! caller -> TariffService -> TariffCache -> TariffFetcher -> TariffSourceTrait
//!                 |
//!                 +-> denomination_resolver (pure)
//! ```

mod denomination_resolver;
mod tariffs_cache;
mod tariffs_errors;
mod tariffs_fetcher;
mod tariffs_model;
mod tariffs_service;
mod tariffs_traits;

pub use denomination_resolver::{
    format_stamp_value, resolve_denomination, DenominationRule, StampValue,
};
pub use tariffs_cache::{CachePolicy, TariffCache};
pub use tariffs_errors::TariffError;
pub use tariffs_fetcher::{select_latest, TariffFetcher};
pub use tariffs_model::{TariffCurrency, TariffSnapshot, TariffTable, NOT_AVAILABLE};
pub use tariffs_service::TariffService;
pub use tariffs_traits::{TariffServiceTrait, TariffSourceTrait};
