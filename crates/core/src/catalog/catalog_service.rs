use async_trait::async_trait;
use ecollecto_catalog_api::{Designer, FirstDayCover, Stamp};
use log::{debug, warn};
use std::sync::Arc;

use super::catalog_errors::CatalogError;
use super::catalog_model::{CatalogEntity, StampListing};
use super::catalog_traits::{CatalogServiceTrait, CatalogSourceTrait};
use super::search::{matches_first_day_cover, matches_stamp, SearchTerm};
use crate::errors::Result;
use crate::tariffs::{format_stamp_value, TariffServiceTrait, TariffTable};

#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn CatalogSourceTrait>,
    tariffs: Arc<dyn TariffServiceTrait>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSourceTrait>, tariffs: Arc<dyn TariffServiceTrait>) -> Self {
        Self { source, tariffs }
    }

    /// Load the tariff table once for a batch of listings.
    ///
    /// Failures degrade to `None` so that stamps still list with `"N/A"`.
    async fn load_tariffs(&self) -> Option<Arc<TariffTable>> {
        match self.tariffs.get_tariffs().await {
            Ok(table) => table,
            Err(e) => {
                warn!("Listing stamps without tariffs: {}", e);
                None
            }
        }
    }

    fn price(stamp: Stamp, table: Option<&TariffTable>) -> StampListing {
        let price = format_stamp_value(stamp.meta.denomination.as_ref(), table);
        StampListing { stamp, price }
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    async fn list_stamps(&self, search: Option<&str>) -> Result<Vec<StampListing>> {
        let term = SearchTerm::from_query(search).unwrap_or_default();
        let stamps = self
            .source
            .list_stamps()
            .await
            .map_err(CatalogError::from)?;
        let total = stamps.len();

        let table = self.load_tariffs().await;
        let listings: Vec<StampListing> = stamps
            .into_iter()
            .filter(|stamp| matches_stamp(stamp, &term))
            .map(|stamp| Self::price(stamp, table.as_deref()))
            .collect();

        debug!(
            "Listed {} of {} stamps for search '{}'",
            listings.len(),
            total,
            term.as_str()
        );
        Ok(listings)
    }

    async fn get_stamp(&self, id: &str) -> Result<StampListing> {
        let stamp = self
            .source
            .get_stamp(id)
            .await
            .map_err(CatalogError::from)?
            .ok_or_else(|| CatalogError::not_found(CatalogEntity::Stamp, id))?;

        let table = self.load_tariffs().await;
        Ok(Self::price(stamp, table.as_deref()))
    }

    async fn list_first_day_covers(&self, search: Option<&str>) -> Result<Vec<FirstDayCover>> {
        let term = SearchTerm::from_query(search).unwrap_or_default();
        let covers = self
            .source
            .list_first_day_covers()
            .await
            .map_err(CatalogError::from)?;
        Ok(covers
            .into_iter()
            .filter(|cover| matches_first_day_cover(cover, &term))
            .collect())
    }

    async fn get_first_day_cover(&self, id: &str) -> Result<FirstDayCover> {
        let cover = self
            .source
            .get_first_day_cover(id)
            .await
            .map_err(CatalogError::from)?
            .ok_or_else(|| CatalogError::not_found(CatalogEntity::FirstDayCover, id))?;
        Ok(cover)
    }

    async fn list_designers(&self) -> Result<Vec<Designer>> {
        Ok(self
            .source
            .list_designers()
            .await
            .map_err(CatalogError::from)?)
    }

    async fn get_designer(&self, id: &str) -> Result<Designer> {
        let designer = self
            .source
            .get_designer(id)
            .await
            .map_err(CatalogError::from)?
            .ok_or_else(|| CatalogError::not_found(CatalogEntity::Designer, id))?;
        Ok(designer)
    }
}
