use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::{
    error::ApiError,
    middleware::auth::AuthenticatedUser,
    response::{ok, ApiResponse},
    routes::{items::ItemIdQuery, json_body, required_param},
    state::AppState,
};
use shared::models::requests::BidItemRequest;
use shared::services::bid_service::PlacedBid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bid-item", post(bid_item))
        .route("/get-total-bid-amount", get(get_total_bid_amount))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalBidAmount {
    item_id: String,
    total_bid_amount: i64,
}

async fn bid_item(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    payload: Result<Json<BidItemRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PlacedBid>>, ApiError> {
    let request = json_body(payload)?;
    let settings = state.settings_service.get_settings().await?;

    let placed = state
        .bid_service
        .place_bid(&authenticated_user.user_id, &request, &settings, Utc::now())
        .await?;

    Ok(ok(placed))
}

async fn get_total_bid_amount(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Query(query): Query<ItemIdQuery>,
) -> Result<Json<ApiResponse<TotalBidAmount>>, ApiError> {
    let item_id = required_param(query.item_id, "itemId")?;

    let total_bid_amount = state
        .bid_service
        .get_total_bid_amount(&authenticated_user.user_id, &item_id)
        .await?;

    Ok(ok(TotalBidAmount {
        item_id,
        total_bid_amount,
    }))
}
