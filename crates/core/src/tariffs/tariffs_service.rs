use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::denomination_resolver::format_stamp_value;
use super::tariffs_cache::{CachePolicy, TariffCache};
use super::tariffs_errors::TariffError;
use super::tariffs_fetcher::TariffFetcher;
use super::tariffs_model::{TariffSnapshot, TariffTable, NOT_AVAILABLE};
use super::tariffs_traits::{TariffServiceTrait, TariffSourceTrait};
use crate::clock::Clock;
use crate::errors::Result;
use crate::Denomination;

/// Tariff resolution service backed by a process-wide cache.
#[derive(Clone)]
pub struct TariffService {
    cache: Arc<TariffCache>,
}

impl TariffService {
    pub fn new(source: Arc<dyn TariffSourceTrait>) -> Self {
        Self::from_cache(TariffCache::new(Arc::new(TariffFetcher::new(source))))
    }

    /// Build a service with a custom expiry policy and clock.
    pub fn with_options(
        source: Arc<dyn TariffSourceTrait>,
        policy: CachePolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = TariffCache::new(Arc::new(TariffFetcher::new(source)))
            .with_policy(policy)
            .with_clock(clock);
        Self::from_cache(cache)
    }

    fn from_cache(cache: TariffCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    async fn require_snapshot(&self) -> Result<Arc<TariffSnapshot>> {
        self.cache
            .get_snapshot()
            .await?
            .ok_or_else(|| TariffError::Unavailable.into())
    }

    async fn require_year(&self, year: i32) -> Result<Arc<TariffTable>> {
        let snapshot = self.require_snapshot().await?;
        snapshot.year(year).cloned().ok_or_else(|| {
            log::debug!("Tariffs not found for year {}", year);
            TariffError::YearNotFound(year).into()
        })
    }
}

fn currency_tariffs(table: &TariffTable, currency: &str) -> Result<BTreeMap<String, Decimal>> {
    table
        .currency(currency)
        .cloned()
        .ok_or_else(|| TariffError::CurrencyNotFound(currency.to_uppercase()).into())
}

fn tariff(table: &TariffTable, currency: &str, code: &str) -> Result<Decimal> {
    if table.currency(currency).is_none() {
        return Err(TariffError::CurrencyNotFound(currency.to_uppercase()).into());
    }
    table.lookup(currency, code).ok_or_else(|| {
        TariffError::CodeNotFound {
            currency: currency.to_uppercase(),
            code: code.to_string(),
        }
        .into()
    })
}

#[async_trait]
impl TariffServiceTrait for TariffService {
    async fn get_tariffs(&self) -> Result<Option<Arc<TariffTable>>> {
        let snapshot = self.cache.get_snapshot().await?;
        Ok(snapshot.map(|s| Arc::clone(&s.latest)))
    }

    async fn get_currency_tariffs(&self, currency: &str) -> Result<BTreeMap<String, Decimal>> {
        let snapshot = self.require_snapshot().await?;
        currency_tariffs(&snapshot.latest, currency)
    }

    async fn get_tariff(&self, currency: &str, code: &str) -> Result<Decimal> {
        let snapshot = self.require_snapshot().await?;
        tariff(&snapshot.latest, currency, code)
    }

    async fn get_currency_tariffs_for_year(
        &self,
        year: i32,
        currency: &str,
    ) -> Result<BTreeMap<String, Decimal>> {
        let table = self.require_year(year).await?;
        currency_tariffs(&table, currency)
    }

    async fn get_tariff_for_year(&self, year: i32, currency: &str, code: &str) -> Result<Decimal> {
        let table = self.require_year(year).await?;
        tariff(&table, currency, code)
    }

    async fn format_value(&self, denomination: Option<&Denomination>) -> String {
        let Some(denomination) = denomination else {
            return NOT_AVAILABLE.to_string();
        };

        match self.cache.get_snapshot().await {
            Ok(snapshot) => format_stamp_value(
                Some(denomination),
                snapshot.as_ref().map(|s| s.latest.as_ref()),
            ),
            Err(e) => {
                log::warn!("Pricing denomination '{}' without tariffs: {}", denomination, e);
                NOT_AVAILABLE.to_string()
            }
        }
    }

    fn reset(&self) {
        self.cache.reset();
    }
}
