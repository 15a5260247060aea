//! Catalog module - stamp, first-day cover and designer listings with prices.

mod catalog_errors;
mod catalog_model;
mod catalog_service;
mod catalog_traits;
mod search;

pub use catalog_errors::CatalogError;
pub use catalog_model::{CatalogEntity, StampListing};
pub use catalog_service::CatalogService;
pub use catalog_traits::{CatalogServiceTrait, CatalogSourceTrait};
pub use search::{matches_first_day_cover, matches_stamp, SearchTerm};
