use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ecollecto_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Core(e) if e.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("Request failed with {}: {}", status, self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
