use ecollecto_catalog_api::Stamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of catalog records, used in not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogEntity {
    Stamp,
    FirstDayCover,
    Designer,
}

impl fmt::Display for CatalogEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogEntity::Stamp => "Stamp",
            CatalogEntity::FirstDayCover => "First-day cover",
            CatalogEntity::Designer => "Designer",
        };
        f.write_str(name)
    }
}

/// A stamp together with its rendered price (`"12.50 UAH"` or `"N/A"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampListing {
    #[serde(flatten)]
    pub stamp: Stamp,
    pub price: String,
}
