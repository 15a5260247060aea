use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use ecollecto_core::Denomination;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct FormatQuery {
    value: Option<String>,
}

#[derive(Serialize)]
struct FormattedDenomination {
    value: String,
    formatted: String,
}

/// Price a free-form denomination, e.g. `?value=F%2B8.00`.
async fn format_denomination(
    Query(query): Query<FormatQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<FormattedDenomination>> {
    let value = query
        .value
        .ok_or_else(|| ApiError::BadRequest("Query parameter 'value' is required".to_string()))?;
    let denomination = Denomination::from(value.as_str());
    let formatted = state.tariff_service.format_value(Some(&denomination)).await;
    Ok(Json(FormattedDenomination { value, formatted }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/denominations/format", get(format_denomination))
}
