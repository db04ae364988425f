use thiserror::Error;

use crate::repositories::errors::settings_repository_errors::SettingsRepositoryError;

#[derive(Debug, Error)]
pub enum SettingsServiceError {
    #[error("User {0} is not allowed to change settings")]
    Forbidden(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<SettingsRepositoryError> for SettingsServiceError {
    fn from(error: SettingsRepositoryError) -> Self {
        match error {
            SettingsRepositoryError::Serialization(msg) => {
                SettingsServiceError::SerializationError(msg)
            }
            SettingsRepositoryError::DynamoDb(msg) => SettingsServiceError::RepositoryError(msg),
        }
    }
}
