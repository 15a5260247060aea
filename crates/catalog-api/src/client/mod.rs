//! HTTP client for the catalog backend.

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::errors::CatalogApiError;
use crate::models::{Designer, FirstDayCover, Stamp, TariffRecord};

const TARIFFS_ENDPOINT: &str = "/api/tariffs";
const STAMPS_ENDPOINT: &str = "/api/stamps";
const STAMP_ENDPOINT: &str = "/api/stamp";
const FIRST_DAY_COVERS_ENDPOINT: &str = "/api/first-day-covers";
const DESIGNERS_ENDPOINT: &str = "/api/designers";
const DESIGNER_ENDPOINT: &str = "/api/designer";

/// Error body produced by the backend's exception handlers.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    code: Option<String>,
}

/// Catalog backend client.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use ecollecto_catalog_api::{CatalogApiClient, ClientConfig};
///
/// let client = CatalogApiClient::new(ClientConfig::from_env()?)?;
/// let stamps = client.list_stamps().await?;
/// ```
#[derive(Clone)]
pub struct CatalogApiClient {
    client: Client,
    base_url: String,
}

impl CatalogApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, CatalogApiError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` and return the body. A 404 yields `Ok(None)`.
    async fn fetch(&self, endpoint: &str) -> Result<Option<String>, CatalogApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Catalog request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogApiError::from_send(endpoint, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(ErrorResponse {
                    message: Some(message),
                    code,
                }) => warn!(
                    "Catalog request {} failed with {} ({}): {}",
                    endpoint,
                    status,
                    code.unwrap_or_default(),
                    message
                ),
                _ => warn!("Catalog request {} failed with {}", endpoint, status),
            }
            return Err(CatalogApiError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogApiError::from_send(endpoint, e))?;
        Ok(Some(body))
    }

    /// GET a resource that must exist; 404 becomes a `NotFound` error.
    async fn fetch_required(&self, endpoint: &str) -> Result<String, CatalogApiError> {
        self.fetch(endpoint)
            .await?
            .ok_or_else(|| CatalogApiError::NotFound(endpoint.to_string()))
    }

    async fn fetch_list<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>, CatalogApiError> {
        let body = self.fetch_required(endpoint).await?;
        decode(endpoint, &body)
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, CatalogApiError> {
        let endpoint = format!("{}/{}", collection, urlencoding::encode(id));
        match self.fetch(&endpoint).await? {
            Some(body) => decode(&endpoint, &body).map(Some),
            None => Ok(None),
        }
    }

    /// Fetch every yearly tariff record.
    ///
    /// Returns `Ok(None)` when the body is valid JSON but not an array.
    pub async fn get_tariff_records(&self) -> Result<Option<Vec<TariffRecord>>, CatalogApiError> {
        let body = self.fetch_required(TARIFFS_ENDPOINT).await?;
        parse_tariff_records(&body)
    }

    pub async fn list_stamps(&self) -> Result<Vec<Stamp>, CatalogApiError> {
        self.fetch_list(STAMPS_ENDPOINT).await
    }

    pub async fn get_stamp(&self, id: &str) -> Result<Option<Stamp>, CatalogApiError> {
        self.fetch_one(STAMP_ENDPOINT, id).await
    }

    pub async fn list_first_day_covers(&self) -> Result<Vec<FirstDayCover>, CatalogApiError> {
        self.fetch_list(FIRST_DAY_COVERS_ENDPOINT).await
    }

    pub async fn get_first_day_cover(
        &self,
        id: &str,
    ) -> Result<Option<FirstDayCover>, CatalogApiError> {
        self.fetch_one(FIRST_DAY_COVERS_ENDPOINT, id).await
    }

    pub async fn list_designers(&self) -> Result<Vec<Designer>, CatalogApiError> {
        self.fetch_list(DESIGNERS_ENDPOINT).await
    }

    pub async fn get_designer(&self, id: &str) -> Result<Option<Designer>, CatalogApiError> {
        self.fetch_one(DESIGNER_ENDPOINT, id).await
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, CatalogApiError> {
    serde_json::from_str(body).map_err(|e| CatalogApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Parse a `/api/tariffs` body.
///
/// Invalid JSON is a decode error. Valid JSON that is not an array is a
/// malformed payload and yields `Ok(None)`. Array items that do not decode as
/// a [`TariffRecord`] are skipped.
pub fn parse_tariff_records(body: &str) -> Result<Option<Vec<TariffRecord>>, CatalogApiError> {
    let value: serde_json::Value = decode(TARIFFS_ENDPOINT, body)?;

    let serde_json::Value::Array(items) = value else {
        warn!("Tariff payload is not an array, treating as no tariffs");
        return Ok(None);
    };

    let records = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<TariffRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping tariff record #{}: {}", index, e);
                None
            }
        })
        .collect();

    Ok(Some(records))
}
