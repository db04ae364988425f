use std::sync::Arc;

use tracing::{debug, info};

use crate::models::settings::AuctionSettings;
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        UserService { repository }
    }

    pub async fn create_user(&self, user: &User) -> Result<(), UserServiceError> {
        if user.id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository.create_user(user).await?;
        info!("Created user {}", user.id);
        Ok(())
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        Ok(self.repository.get_user_by_id(user_id).await?)
    }

    pub async fn deposit(
        &self,
        user_id: &str,
        amount: i64,
        settings: &AuctionSettings,
    ) -> Result<User, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }

        if amount <= 0 {
            return Err(UserServiceError::ValidationError(
                "Deposit amount must be positive".to_string(),
            ));
        }

        if amount > settings.max_deposit_amount {
            return Err(UserServiceError::ValidationError(format!(
                "Deposit amount cannot exceed {}",
                settings.max_deposit_amount
            )));
        }

        let user = self.repository.credit_balance(user_id, amount).await?;
        debug!("User {} deposited {}, balance {}", user_id, amount, user.balance);
        Ok(user)
    }
}
