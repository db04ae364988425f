use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};

use crate::models::bid::{BidRecord, BidStatus};
use crate::repositories::errors::bid_repository_errors::BidRepositoryError;
use crate::repositories::string_value;

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbBidRepository {
    pub client: Client,
    pub table_name: String,
    /// GSI partitioned on `itemId`.
    pub item_index: String,
}

impl DynamoDbBidRepository {
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        item_index: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            item_index: item_index.into(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BidRepository: Send + Sync {
    async fn create_bid(&self, bid: &BidRecord) -> Result<(), BidRepositoryError>;
    async fn get_bids_for_item(&self, item_id: &str) -> Result<Vec<BidRecord>, BidRepositoryError>;
    /// Moves a bid from `from` to `to`. Returns `false` if it was not in `from`.
    async fn transition_bid_status(
        &self,
        bid_id: &str,
        from: BidStatus,
        to: BidStatus,
    ) -> Result<bool, BidRepositoryError>;
}

#[async_trait]
impl BidRepository for DynamoDbBidRepository {
    async fn create_bid(&self, bid: &BidRecord) -> Result<(), BidRepositoryError> {
        let item = to_item(bid).map_err(|e| BidRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| BidRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn get_bids_for_item(&self, item_id: &str) -> Result<Vec<BidRecord>, BidRepositoryError> {
        let mut bids = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(&self.item_index)
                .key_condition_expression("itemId = :item_id")
                .expression_attribute_values(":item_id", string_value(item_id))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| BidRepositoryError::DynamoDb(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                let bid: BidRecord = from_item(item)
                    .map_err(|e| BidRepositoryError::Serialization(e.to_string()))?;
                bids.push(bid);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(bids)
    }

    async fn transition_bid_status(
        &self,
        bid_id: &str,
        from: BidStatus,
        to: BidStatus,
    ) -> Result<bool, BidRepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("bidId", string_value(bid_id))
            .update_expression("SET #status = :to")
            .condition_expression("#status = :from")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":from", string_value(from.as_str()))
            .expression_attribute_values(":to", string_value(to.as_str()))
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if service_err.err().is_conditional_check_failed_exception() =>
            {
                Ok(false)
            }
            Err(e) => Err(BidRepositoryError::DynamoDb(e.to_string())),
        }
    }
}
