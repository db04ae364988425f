use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Success envelope: `{"timestamp": .., "data": ..}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub timestamp: i64,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Failure envelope: `{"timestamp": .., "error": {"code": .., "message": ..}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub timestamp: i64,
    pub error: ErrorBody,
}

pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        timestamp: Utc::now().timestamp_millis(),
        data,
    })
}
