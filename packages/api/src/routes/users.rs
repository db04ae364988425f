use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::ApiError,
    middleware::auth::AuthenticatedUser,
    response::{ok, ApiResponse},
    routes::json_body,
    state::AppState,
};
use shared::models::requests::DepositRequest;
use shared::models::user::User;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/get-user", get(get_user))
        .route("/deposit", post(deposit))
}

async fn get_user(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state
        .user_service
        .get_user_by_id(&authenticated_user.user_id)
        .await?;
    Ok(ok(user))
}

async fn deposit(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    payload: Result<Json<DepositRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let request = json_body(payload)?;
    let settings = state.settings_service.get_settings().await?;

    let user = state
        .user_service
        .deposit(&authenticated_user.user_id, request.amount, &settings)
        .await?;

    Ok(ok(user))
}
