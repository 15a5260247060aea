use ecollecto_catalog_api::CatalogApiError;
use thiserror::Error;

use super::catalog_model::CatalogEntity;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: CatalogEntity, id: String },

    #[error("Catalog backend request failed: {0}")]
    Upstream(#[from] CatalogApiError),
}

impl CatalogError {
    pub fn not_found(entity: CatalogEntity, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
