use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};

use crate::models::settings::{AuctionSettings, SETTINGS_ID};
use crate::repositories::errors::settings_repository_errors::SettingsRepositoryError;
use crate::repositories::string_value;

pub struct DynamoDbSettingsRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbSettingsRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_settings(&self) -> Result<Option<AuctionSettings>, SettingsRepositoryError>;
    async fn put_settings(&self, settings: &AuctionSettings)
        -> Result<(), SettingsRepositoryError>;
}

#[async_trait]
impl SettingsRepository for DynamoDbSettingsRepository {
    async fn get_settings(&self) -> Result<Option<AuctionSettings>, SettingsRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", string_value(SETTINGS_ID))
            .send()
            .await
            .map_err(|e| SettingsRepositoryError::DynamoDb(e.to_string()))?;

        output
            .item
            .map(|item| {
                from_item(item).map_err(|e| SettingsRepositoryError::Serialization(e.to_string()))
            })
            .transpose()
    }

    async fn put_settings(
        &self,
        settings: &AuctionSettings,
    ) -> Result<(), SettingsRepositoryError> {
        let item =
            to_item(settings).map_err(|e| SettingsRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| SettingsRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }
}
