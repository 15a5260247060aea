use async_trait::async_trait;
use ecollecto_catalog_api::{CatalogApiClient, TariffRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::tariffs_errors::TariffError;
use super::tariffs_model::TariffTable;
use crate::errors::Result;
use crate::Denomination;

/// Remote source of yearly tariff records.
#[async_trait]
pub trait TariffSourceTrait: Send + Sync {
    /// Fetch every tariff record. `Ok(None)` means the payload was malformed.
    async fn fetch_tariff_records(
        &self,
    ) -> std::result::Result<Option<Vec<TariffRecord>>, TariffError>;
}

#[async_trait]
impl TariffSourceTrait for CatalogApiClient {
    async fn fetch_tariff_records(
        &self,
    ) -> std::result::Result<Option<Vec<TariffRecord>>, TariffError> {
        self.get_tariff_records().await.map_err(TariffError::from)
    }
}

/// Trait defining the contract for tariff service operations.
#[async_trait]
pub trait TariffServiceTrait: Send + Sync {
    /// The latest tariff table, or `None` when the backend has none.
    async fn get_tariffs(&self) -> Result<Option<Arc<TariffTable>>>;

    /// Tariffs for one currency of the latest table.
    async fn get_currency_tariffs(&self, currency: &str) -> Result<BTreeMap<String, Decimal>>;

    /// A single tariff of the latest table.
    async fn get_tariff(&self, currency: &str, code: &str) -> Result<Decimal>;

    /// Tariffs for one currency of a given year's table.
    async fn get_currency_tariffs_for_year(
        &self,
        year: i32,
        currency: &str,
    ) -> Result<BTreeMap<String, Decimal>>;

    /// A single tariff of a given year's table.
    async fn get_tariff_for_year(&self, year: i32, currency: &str, code: &str) -> Result<Decimal>;

    /// Price a denomination; degrades to `"N/A"` when tariffs cannot be loaded.
    async fn format_value(&self, denomination: Option<&Denomination>) -> String;

    /// Forget the memoized table so the next call fetches again.
    fn reset(&self);
}
