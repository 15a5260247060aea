use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use ecollecto_core::tariffs::TariffTable;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TariffPrice {
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    currency: String,
    code: String,
    price: Decimal,
}

/// Latest tariff table, `null` when the backend has none.
async fn get_tariffs(State(state): State<Arc<AppState>>) -> ApiResult<Json<Option<TariffTable>>> {
    let table = state.tariff_service.get_tariffs().await?;
    Ok(Json(table.map(|t| (*t).clone())))
}

async fn get_currency_tariffs(
    Path(currency): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BTreeMap<String, Decimal>>> {
    let tariffs = state.tariff_service.get_currency_tariffs(&currency).await?;
    Ok(Json(tariffs))
}

async fn get_tariff(
    Path((currency, code)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TariffPrice>> {
    let price = state.tariff_service.get_tariff(&currency, &code).await?;
    Ok(Json(TariffPrice {
        year: None,
        currency: currency.to_uppercase(),
        code,
        price,
    }))
}

async fn get_currency_tariffs_for_year(
    Path((year, currency)): Path<(i32, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BTreeMap<String, Decimal>>> {
    let tariffs = state
        .tariff_service
        .get_currency_tariffs_for_year(year, &currency)
        .await?;
    Ok(Json(tariffs))
}

async fn get_tariff_for_year(
    Path((year, currency, code)): Path<(i32, String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TariffPrice>> {
    let price = state
        .tariff_service
        .get_tariff_for_year(year, &currency, &code)
        .await?;
    Ok(Json(TariffPrice {
        year: Some(year),
        currency: currency.to_uppercase(),
        code,
        price,
    }))
}

/// Drop the memoized table; the next read fetches it again.
async fn refresh_tariffs(State(state): State<Arc<AppState>>) -> StatusCode {
    state.tariff_service.reset();
    tracing::info!("Tariff cache reset");
    StatusCode::NO_CONTENT
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tariffs", get(get_tariffs))
        .route("/tariffs/refresh", post(refresh_tariffs))
        .route("/tariffs/{currency}", get(get_currency_tariffs))
        .route("/tariffs/{currency}/{code}", get(get_tariff))
        .route(
            "/tariffs/years/{year}/{currency}",
            get(get_currency_tariffs_for_year),
        )
        .route(
            "/tariffs/years/{year}/{currency}/{code}",
            get(get_tariff_for_year),
        )
}
