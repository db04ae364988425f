use thiserror::Error;

use crate::repositories::errors::bid_repository_errors::BidRepositoryError;
use crate::repositories::errors::item_repository_errors::ItemRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;

#[derive(Debug, Error)]
pub enum SettlementServiceError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<ItemRepositoryError> for SettlementServiceError {
    fn from(error: ItemRepositoryError) -> Self {
        SettlementServiceError::RepositoryError(error.to_string())
    }
}

impl From<BidRepositoryError> for SettlementServiceError {
    fn from(error: BidRepositoryError) -> Self {
        SettlementServiceError::RepositoryError(error.to_string())
    }
}

impl From<UserRepositoryError> for SettlementServiceError {
    fn from(error: UserRepositoryError) -> Self {
        SettlementServiceError::RepositoryError(error.to_string())
    }
}
