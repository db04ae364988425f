use thiserror::Error;

use crate::repositories::errors::user_repository_errors::UserRepositoryError;

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("User not found")]
    UserNotFound,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Repository error: {0}")]
    RepositoryError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<UserRepositoryError> for UserServiceError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::NotFound => UserServiceError::UserNotFound,
            UserRepositoryError::AlreadyExists => UserServiceError::UserAlreadyExists,
            UserRepositoryError::Serialization(msg) => UserServiceError::SerializationError(msg),
            other => UserServiceError::RepositoryError(other.to_string()),
        }
    }
}
