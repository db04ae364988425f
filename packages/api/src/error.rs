use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use lambda_http::tracing::error;
use shared::services::errors::{
    bid_service_errors::BidServiceError, item_service_errors::ItemServiceError,
    settings_service_errors::SettingsServiceError, user_service_errors::UserServiceError,
};

use crate::response::{ErrorBody, ErrorResponse};

/// Short identifiers returned to clients. The leading letter fixes the HTTP status:
/// `B` bad request, `A` authorization failure, `I` internal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing or malformed field or parameter.
    B001,
    /// Item not found.
    B002,
    /// Auction completed or expired.
    B003,
    /// Bid on own item.
    B004,
    /// Insufficient balance.
    B005,
    /// Bid too low.
    B006,
    /// Bidding too frequently.
    B007,
    /// User not found.
    B008,
    /// User already exists.
    B009,
    /// Missing or invalid credentials.
    A001,
    /// Caller is not permitted.
    A002,
    /// Database failure.
    I001,
    /// Serialization failure.
    I002,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::B001 => "B001",
            ErrorCode::B002 => "B002",
            ErrorCode::B003 => "B003",
            ErrorCode::B004 => "B004",
            ErrorCode::B005 => "B005",
            ErrorCode::B006 => "B006",
            ErrorCode::B007 => "B007",
            ErrorCode::B008 => "B008",
            ErrorCode::B009 => "B009",
            ErrorCode::A001 => "A001",
            ErrorCode::A002 => "A002",
            ErrorCode::I001 => "I001",
            ErrorCode::I002 => "I002",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.as_str().as_bytes()[0] {
            b'B' => StatusCode::BAD_REQUEST,
            b'A' => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    UserService(UserServiceError),
    ItemService(ItemServiceError),
    BidService(BidServiceError),
    SettingsService(SettingsServiceError),
    BadRequest(String),
    Unauthorized(String),
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        ApiError::UserService(error)
    }
}

impl From<ItemServiceError> for ApiError {
    fn from(error: ItemServiceError) -> Self {
        ApiError::ItemService(error)
    }
}

impl From<BidServiceError> for ApiError {
    fn from(error: BidServiceError) -> Self {
        ApiError::BidService(error)
    }
}

impl From<SettingsServiceError> for ApiError {
    fn from(error: SettingsServiceError) -> Self {
        ApiError::SettingsService(error)
    }
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::BadRequest(_) => ErrorCode::B001,
            ApiError::Unauthorized(_) => ErrorCode::A001,

            ApiError::UserService(UserServiceError::ValidationError(_)) => ErrorCode::B001,
            ApiError::UserService(UserServiceError::UserNotFound) => ErrorCode::B008,
            ApiError::UserService(UserServiceError::UserAlreadyExists) => ErrorCode::B009,
            ApiError::UserService(UserServiceError::RepositoryError(_)) => ErrorCode::I001,
            ApiError::UserService(UserServiceError::SerializationError(_)) => ErrorCode::I002,

            ApiError::ItemService(ItemServiceError::ValidationError(_)) => ErrorCode::B001,
            ApiError::ItemService(ItemServiceError::ItemNotFound) => ErrorCode::B002,
            ApiError::ItemService(ItemServiceError::RepositoryError(_)) => ErrorCode::I001,
            ApiError::ItemService(ItemServiceError::SerializationError(_)) => ErrorCode::I002,

            ApiError::BidService(BidServiceError::ValidationError(_)) => ErrorCode::B001,
            ApiError::BidService(BidServiceError::ItemNotFound) => ErrorCode::B002,
            ApiError::BidService(BidServiceError::AuctionClosed) => ErrorCode::B003,
            ApiError::BidService(BidServiceError::OwnItem) => ErrorCode::B004,
            ApiError::BidService(BidServiceError::InsufficientBalance { .. }) => ErrorCode::B005,
            ApiError::BidService(BidServiceError::BidTooLow { .. }) => ErrorCode::B006,
            ApiError::BidService(BidServiceError::TooFrequent { .. }) => ErrorCode::B007,
            ApiError::BidService(BidServiceError::UserNotFound) => ErrorCode::B008,
            ApiError::BidService(BidServiceError::RepositoryError(_)) => ErrorCode::I001,
            ApiError::BidService(BidServiceError::SerializationError(_)) => ErrorCode::I002,

            ApiError::SettingsService(SettingsServiceError::Forbidden(_)) => ErrorCode::A002,
            ApiError::SettingsService(SettingsServiceError::ValidationError(_)) => {
                ErrorCode::B001
            }
            ApiError::SettingsService(SettingsServiceError::RepositoryError(_)) => {
                ErrorCode::I001
            }
            ApiError::SettingsService(SettingsServiceError::SerializationError(_)) => {
                ErrorCode::I002
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::UserService(e) => write!(f, "{}", e),
            ApiError::ItemService(e) => write!(f, "{}", e),
            ApiError::BidService(e) => write!(f, "{}", e),
            ApiError::SettingsService(e) => write!(f, "{}", e),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = code.status();

        error!("[{}] {}", code.as_str(), self);

        // internal details stay in the logs
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            timestamp: Utc::now().timestamp_millis(),
            error: ErrorBody {
                code: code.as_str(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
