//! eCollecto Core - tariff resolution and catalog services.
//!
//! This crate turns raw catalog records into storefront-ready data. Its
//! centrepiece is the tariff resolution service: a cached, deduplicated fetch
//! of the latest postal tariff table and a resolver that prices a stamp's
//! denomination against it.
//!
//! It is transport-agnostic and defines traits that are implemented by the
//! `catalog-api` crate's HTTP client.

pub mod catalog;
pub mod clock;
pub mod errors;
pub mod tariffs;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

pub use ecollecto_catalog_api::Denomination;
