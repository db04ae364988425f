use thiserror::Error;

use crate::repositories::errors::item_repository_errors::ItemRepositoryError;

#[derive(Debug, Error)]
pub enum ItemServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Item not found")]
    ItemNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ItemRepositoryError> for ItemServiceError {
    fn from(error: ItemRepositoryError) -> Self {
        match error {
            ItemRepositoryError::NotFound => ItemServiceError::ItemNotFound,
            ItemRepositoryError::Serialization(msg) => ItemServiceError::SerializationError(msg),
            other => ItemServiceError::RepositoryError(other.to_string()),
        }
    }
}
