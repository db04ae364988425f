use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::ReturnValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};

use crate::models::item::{Item, ItemStatus};
use crate::repositories::errors::item_repository_errors::ItemRepositoryError;
use crate::repositories::{number_value, string_value};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbItemRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbItemRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create_item(&self, item: &Item) -> Result<(), ItemRepositoryError>;
    async fn get_item(&self, item_id: &str) -> Result<Option<Item>, ItemRepositoryError>;
    /// Every item, or only those in `status` when given.
    async fn list_items(
        &self,
        status: Option<ItemStatus>,
    ) -> Result<Vec<Item>, ItemRepositoryError>;
    /// Raises the highest bid. Fails with `ConditionFailed` unless the item is still
    /// ongoing and `total` beats the stored highest bid.
    async fn record_highest_bid(
        &self,
        item_id: &str,
        bidder_id: &str,
        total: i64,
        timestamp: i64,
    ) -> Result<Item, ItemRepositoryError>;
    /// Returns `false` when the item was no longer ongoing.
    async fn mark_completed(&self, item_id: &str) -> Result<bool, ItemRepositoryError>;
}

#[async_trait]
impl ItemRepository for DynamoDbItemRepository {
    async fn create_item(&self, item: &Item) -> Result<(), ItemRepositoryError> {
        let record =
            to_item(item).map_err(|e| ItemRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record))
            .send()
            .await
            .map_err(|e| ItemRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<Item>, ItemRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("itemId", string_value(item_id))
            .send()
            .await
            .map_err(|e| ItemRepositoryError::DynamoDb(e.to_string()))?;

        match output.item {
            Some(record) => {
                let item: Item = from_item(record)
                    .map_err(|e| ItemRepositoryError::Serialization(e.to_string()))?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn list_items(
        &self,
        status: Option<ItemStatus>,
    ) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key);

            if let Some(status) = status {
                request = request
                    .filter_expression("#status = :status")
                    .expression_attribute_names("#status", "status")
                    .expression_attribute_values(":status", string_value(status.as_str()));
            }

            let output = request
                .send()
                .await
                .map_err(|e| ItemRepositoryError::DynamoDb(e.to_string()))?;

            for record in output.items.unwrap_or_default() {
                let item: Item = from_item(record)
                    .map_err(|e| ItemRepositoryError::Serialization(e.to_string()))?;
                items.push(item);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }

    async fn record_highest_bid(
        &self,
        item_id: &str,
        bidder_id: &str,
        total: i64,
        timestamp: i64,
    ) -> Result<Item, ItemRepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("itemId", string_value(item_id))
            .update_expression(
                "SET highestBid = :total, highestBidder = :bidder, lastBidTimestamp = :timestamp",
            )
            .condition_expression(
                "attribute_exists(itemId) AND #status = :ongoing AND highestBid < :total",
            )
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":total", number_value(total))
            .expression_attribute_values(":bidder", string_value(bidder_id))
            .expression_attribute_values(":timestamp", number_value(timestamp))
            .expression_attribute_values(":ongoing", string_value(ItemStatus::Ongoing.as_str()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(output) => {
                let attributes = output.attributes.ok_or(ItemRepositoryError::NotFound)?;
                from_item(attributes).map_err(|e| ItemRepositoryError::Serialization(e.to_string()))
            }
            Err(SdkError::ServiceError(service_err))
                if service_err.err().is_conditional_check_failed_exception() =>
            {
                Err(ItemRepositoryError::ConditionFailed)
            }
            Err(e) => Err(ItemRepositoryError::DynamoDb(e.to_string())),
        }
    }

    async fn mark_completed(&self, item_id: &str) -> Result<bool, ItemRepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("itemId", string_value(item_id))
            .update_expression("SET #status = :completed")
            .condition_expression("#status = :ongoing")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(
                ":completed",
                string_value(ItemStatus::Completed.as_str()),
            )
            .expression_attribute_values(":ongoing", string_value(ItemStatus::Ongoing.as_str()))
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if service_err.err().is_conditional_check_failed_exception() =>
            {
                Ok(false)
            }
            Err(e) => Err(ItemRepositoryError::DynamoDb(e.to_string())),
        }
    }
}
