use thiserror::Error;

use crate::repositories::errors::bid_repository_errors::BidRepositoryError;
use crate::repositories::errors::item_repository_errors::ItemRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;

#[derive(Debug, Error)]
pub enum BidServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Item not found")]
    ItemNotFound,
    #[error("Auction for this item has closed")]
    AuctionClosed,
    #[error("You cannot bid on your own item")]
    OwnItem,
    #[error("Insufficient balance: {balance} available, {amount} required")]
    InsufficientBalance { balance: i64, amount: i64 },
    #[error("Bid too low: total {total} must be at least {minimum}")]
    BidTooLow { total: i64, minimum: i64 },
    #[error("Bidding too frequently, retry in {retry_after_seconds}s")]
    TooFrequent { retry_after_seconds: i64 },
    #[error("User not found")]
    UserNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ItemRepositoryError> for BidServiceError {
    fn from(error: ItemRepositoryError) -> Self {
        match error {
            ItemRepositoryError::NotFound => BidServiceError::ItemNotFound,
            ItemRepositoryError::Serialization(msg) => BidServiceError::SerializationError(msg),
            other => BidServiceError::RepositoryError(other.to_string()),
        }
    }
}

impl From<BidRepositoryError> for BidServiceError {
    fn from(error: BidRepositoryError) -> Self {
        match error {
            BidRepositoryError::Serialization(msg) => BidServiceError::SerializationError(msg),
            other => BidServiceError::RepositoryError(other.to_string()),
        }
    }
}

impl From<UserRepositoryError> for BidServiceError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::NotFound => BidServiceError::UserNotFound,
            UserRepositoryError::Serialization(msg) => BidServiceError::SerializationError(msg),
            other => BidServiceError::RepositoryError(other.to_string()),
        }
    }
}
