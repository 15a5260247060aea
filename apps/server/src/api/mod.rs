use std::sync::Arc;

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState};

mod denominations;
mod designers;
mod first_day_covers;
mod health;
mod stamps;
mod tariffs;

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .merge(health::router())
        .merge(tariffs::router())
        .merge(denominations::router())
        .merge(stamps::router())
        .merge(first_day_covers::router())
        .merge(designers::router());

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
