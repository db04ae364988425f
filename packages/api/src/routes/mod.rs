use axum::{extract::rejection::JsonRejection, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::{error::ApiError, state::AppState};

pub mod bids;
pub mod health;
pub mod items;
pub mod settings;
pub mod users;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .merge(items::routes())
        .merge(bids::routes())
        .merge(users::routes())
        .merge(settings::routes())
        .layer(cors)
        .with_state(state)
}

/// Turns axum's plain-text body rejection into a B001 envelope.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub(crate) fn required_param(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing query parameter '{}'", name)))
}
