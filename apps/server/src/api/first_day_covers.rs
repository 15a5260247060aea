use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use ecollecto_catalog_api::FirstDayCover;

use super::stamps::SearchQuery;
use crate::{error::ApiResult, main_lib::AppState};

async fn list_first_day_covers(
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<FirstDayCover>>> {
    let covers = state
        .catalog_service
        .list_first_day_covers(query.search.as_deref())
        .await?;
    Ok(Json(covers))
}

async fn get_first_day_cover(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<FirstDayCover>> {
    Ok(Json(state.catalog_service.get_first_day_cover(&id).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/first-day-covers", get(list_first_day_covers))
        .route("/first-day-covers/{id}", get(get_first_day_cover))
}
