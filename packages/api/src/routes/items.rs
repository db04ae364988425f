use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    error::ApiError,
    middleware::auth::AuthenticatedUser,
    response::{ok, ApiResponse},
    routes::{json_body, required_param},
    state::AppState,
};
use shared::models::item::{Item, ItemStatus};
use shared::models::requests::CreateItemRequest;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/get-items", get(get_items))
        .route("/get-item-by-id", get(get_item_by_id))
        .route("/create-item", post(create_item))
}

#[derive(Debug, Deserialize)]
struct ItemsQuery {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemIdQuery {
    #[serde(rename = "itemId")]
    pub(crate) item_id: Option<String>,
}

async fn get_items(
    State(state): State<AppState>,
    Query(query): Query<ItemsQuery>,
) -> Result<Json<ApiResponse<Vec<Item>>>, ApiError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            ItemStatus::parse(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown status '{}'", raw)))?,
        ),
    };

    let items = state.item_service.get_items(status).await?;

    Ok(ok(items))
}

async fn get_item_by_id(
    State(state): State<AppState>,
    Query(query): Query<ItemIdQuery>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    let item_id = required_param(query.item_id, "itemId")?;
    let item = state.item_service.get_item_by_id(&item_id).await?;
    Ok(ok(item))
}

async fn create_item(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    let request = json_body(payload)?;
    let settings = state.settings_service.get_settings().await?;

    let item = state
        .item_service
        .create_item(&authenticated_user.user_id, &request, &settings, Utc::now())
        .await?;

    Ok(ok(item))
}
