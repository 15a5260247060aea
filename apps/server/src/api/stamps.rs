use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use ecollecto_core::catalog::StampListing;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    pub search: Option<String>,
}

async fn list_stamps(
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<StampListing>>> {
    let stamps = state
        .catalog_service
        .list_stamps(query.search.as_deref())
        .await?;
    Ok(Json(stamps))
}

async fn get_stamp(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StampListing>> {
    Ok(Json(state.catalog_service.get_stamp(&id).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stamps", get(list_stamps))
        .route("/stamps/{id}", get(get_stamp))
}
