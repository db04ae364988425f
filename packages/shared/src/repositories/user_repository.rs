use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::ReturnValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};

use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::{number_value, string_value};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError>;
    /// Adds `amount` to the balance and returns the updated user.
    async fn credit_balance(&self, user_id: &str, amount: i64)
        -> Result<User, UserRepositoryError>;
    /// Subtracts `amount` only if the balance covers it.
    async fn debit_balance(&self, user_id: &str, amount: i64) -> Result<User, UserRepositoryError>;
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let item = to_item(user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(SdkError::ServiceError(service_err))
                if service_err.err().is_conditional_check_failed_exception() =>
            {
                Err(UserRepositoryError::AlreadyExists)
            }
            Err(e) => Err(UserRepositoryError::DynamoDb(e.to_string())),
        }
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", string_value(user_id))
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;
        if let Some(item) = output.item {
            let user: User =
                from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
            Ok(user)
        } else {
            Err(UserRepositoryError::NotFound)
        }
    }

    async fn credit_balance(
        &self,
        user_id: &str,
        amount: i64,
    ) -> Result<User, UserRepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", string_value(user_id))
            .update_expression("ADD balance :amount")
            .condition_expression("attribute_exists(id)")
            .expression_attribute_values(":amount", number_value(amount))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;
        match result {
            Ok(output) => {
                let attributes = output.attributes.ok_or(UserRepositoryError::NotFound)?;
                from_item(attributes).map_err(|e| UserRepositoryError::Serialization(e.to_string()))
            }
            Err(SdkError::ServiceError(service_err))
                if service_err.err().is_conditional_check_failed_exception() =>
            {
                Err(UserRepositoryError::NotFound)
            }
            Err(e) => Err(UserRepositoryError::DynamoDb(e.to_string())),
        }
    }

    async fn debit_balance(&self, user_id: &str, amount: i64) -> Result<User, UserRepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", string_value(user_id))
            .update_expression("SET balance = balance - :amount")
            .condition_expression("attribute_exists(id) AND balance >= :amount")
            .expression_attribute_values(":amount", number_value(amount))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;
        match result {
            Ok(output) => {
                let attributes = output.attributes.ok_or(UserRepositoryError::NotFound)?;
                from_item(attributes).map_err(|e| UserRepositoryError::Serialization(e.to_string()))
            }
            Err(SdkError::ServiceError(service_err))
                if service_err.err().is_conditional_check_failed_exception() =>
            {
                Err(UserRepositoryError::InsufficientBalance)
            }
            Err(e) => Err(UserRepositoryError::DynamoDb(e.to_string())),
        }
    }
}
