use async_trait::async_trait;
use ecollecto_catalog_api::{CatalogApiClient, CatalogApiError, Designer, FirstDayCover, Stamp};

use super::catalog_model::StampListing;
use crate::errors::Result;

/// Remote source of catalog records.
#[async_trait]
pub trait CatalogSourceTrait: Send + Sync {
    async fn list_stamps(&self) -> std::result::Result<Vec<Stamp>, CatalogApiError>;
    async fn get_stamp(&self, id: &str) -> std::result::Result<Option<Stamp>, CatalogApiError>;
    async fn list_first_day_covers(
        &self,
    ) -> std::result::Result<Vec<FirstDayCover>, CatalogApiError>;
    async fn get_first_day_cover(
        &self,
        id: &str,
    ) -> std::result::Result<Option<FirstDayCover>, CatalogApiError>;
    async fn list_designers(&self) -> std::result::Result<Vec<Designer>, CatalogApiError>;
    async fn get_designer(
        &self,
        id: &str,
    ) -> std::result::Result<Option<Designer>, CatalogApiError>;
}

#[async_trait]
impl CatalogSourceTrait for CatalogApiClient {
    async fn list_stamps(&self) -> std::result::Result<Vec<Stamp>, CatalogApiError> {
        CatalogApiClient::list_stamps(self).await
    }

    async fn get_stamp(&self, id: &str) -> std::result::Result<Option<Stamp>, CatalogApiError> {
        CatalogApiClient::get_stamp(self, id).await
    }

    async fn list_first_day_covers(
        &self,
    ) -> std::result::Result<Vec<FirstDayCover>, CatalogApiError> {
        CatalogApiClient::list_first_day_covers(self).await
    }

    async fn get_first_day_cover(
        &self,
        id: &str,
    ) -> std::result::Result<Option<FirstDayCover>, CatalogApiError> {
        CatalogApiClient::get_first_day_cover(self, id).await
    }

    async fn list_designers(&self) -> std::result::Result<Vec<Designer>, CatalogApiError> {
        CatalogApiClient::list_designers(self).await
    }

    async fn get_designer(
        &self,
        id: &str,
    ) -> std::result::Result<Option<Designer>, CatalogApiError> {
        CatalogApiClient::get_designer(self, id).await
    }
}

/// Trait defining the contract for storefront catalog operations.
#[async_trait]
pub trait CatalogServiceTrait: Send + Sync {
    /// Priced stamps, optionally filtered by a search term.
    async fn list_stamps(&self, search: Option<&str>) -> Result<Vec<StampListing>>;

    async fn get_stamp(&self, id: &str) -> Result<StampListing>;

    async fn list_first_day_covers(&self, search: Option<&str>) -> Result<Vec<FirstDayCover>>;

    async fn get_first_day_cover(&self, id: &str) -> Result<FirstDayCover>;

    async fn list_designers(&self) -> Result<Vec<Designer>>;

    async fn get_designer(&self, id: &str) -> Result<Designer>;
}
