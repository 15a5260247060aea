use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use ecollecto_catalog_api::Designer;

use crate::{error::ApiResult, main_lib::AppState};

async fn list_designers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Designer>>> {
    Ok(Json(state.catalog_service.list_designers().await?))
}

async fn get_designer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Designer>> {
    Ok(Json(state.catalog_service.get_designer(&id).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/designers", get(list_designers))
        .route("/designers/{id}", get(get_designer))
}
