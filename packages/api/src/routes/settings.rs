use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use lambda_http::tracing::info;

use crate::{
    error::ApiError,
    middleware::auth::AuthenticatedUser,
    response::{ok, ApiResponse},
    routes::json_body,
    state::AppState,
};
use shared::models::requests::UpdateSettingsRequest;
use shared::models::settings::AuctionSettings;

pub fn routes() -> Router<AppState> {
    Router::new().route("/update-env-variables", post(update_settings))
}

async fn update_settings(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    payload: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AuctionSettings>>, ApiError> {
    let request = json_body(payload)?;
    info!(
        "Settings update requested by {}: {:?}",
        authenticated_user.user_id, request
    );

    let settings = state
        .settings_service
        .update_settings(&authenticated_user.user_id, &request, Utc::now())
        .await?;

    Ok(ok(settings))
}
