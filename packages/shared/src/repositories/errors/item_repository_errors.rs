use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemRepositoryError {
    #[error("Item not found")]
    NotFound,
    /// The conditional write lost against a concurrent change to the item.
    #[error("Item was modified concurrently")]
    ConditionFailed,
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),
}
