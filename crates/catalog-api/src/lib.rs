//! eCollecto Catalog API Crate
//!
//! Wire models and an HTTP client for the catalog backend that serves the
//! stamp collection: stamps, first-day covers, designers and the yearly
//! postal tariff tables.
//!
//! # Overview
//!
//! ```text
//! +------------------+      GET /api/tariffs         +------------------+
//! | CatalogApiClient | ----------------------------> |  Catalog backend |
//! |   (reqwest)      |      GET /api/stamps ...      |                  |
//! +------------------+ <---------------------------- +------------------+
//!          |                 JSON payloads
//!          v
//! +------------------+
//! |   Wire models    |  (TariffRecord, Stamp, FirstDayCover, Designer)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`CatalogApiClient`] - HTTP client for the catalog endpoints
//! - [`ClientConfig`] - Base URL and timeout, loadable from the environment
//! - [`TariffRecord`] - One year of tariffs, keyed by currency then letter code
//! - [`Denomination`] - Face value of a stamp, either text or a number
//! - [`CatalogApiError`] - Errors raised by the client

pub mod client;
pub mod config;
pub mod errors;
pub mod models;

pub use client::CatalogApiClient;
pub use config::ClientConfig;
pub use errors::CatalogApiError;
pub use models::{
    CurrencyTariffs, Denomination, Designer, FirstDayCover, FirstDayCoverImages,
    FirstDayCoverRelease, Stamp, StampImages, StampMeta, StampRelease, TariffRecord,
};
