use std::sync::Arc;

use ecollecto_catalog_api::CatalogApiClient;
use ecollecto_core::{
    catalog::{CatalogService, CatalogServiceTrait, CatalogSourceTrait},
    clock::SystemClock,
    tariffs::{CachePolicy, TariffService, TariffServiceTrait, TariffSourceTrait},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub tariff_service: Arc<dyn TariffServiceTrait>,
    pub catalog_service: Arc<dyn CatalogServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("ECOLLECTO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = Arc::new(CatalogApiClient::new(config.catalog.clone())?);
    tracing::info!("Catalog API in use: {}", client.base_url());
    match config.tariff_ttl {
        Some(ttl) => tracing::info!("Tariff table expires after {:?}", ttl),
        None => tracing::info!("Tariff table is kept for the process lifetime"),
    }

    let policy = CachePolicy {
        ttl: config.tariff_ttl,
    };
    Ok(build_state_with(client.clone(), client, policy))
}

/// Wire the services over arbitrary sources.
pub fn build_state_with(
    catalog_source: Arc<dyn CatalogSourceTrait>,
    tariff_source: Arc<dyn TariffSourceTrait>,
    policy: CachePolicy,
) -> Arc<AppState> {
    let tariff_service: Arc<dyn TariffServiceTrait> = Arc::new(TariffService::with_options(
        tariff_source,
        policy,
        Arc::new(SystemClock),
    ));
    let catalog_service: Arc<dyn CatalogServiceTrait> = Arc::new(CatalogService::new(
        catalog_source,
        tariff_service.clone(),
    ));

    Arc::new(AppState {
        tariff_service,
        catalog_service,
    })
}
