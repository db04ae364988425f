pub mod bid_repository;
pub mod errors;
#[cfg(any(test, feature = "testing"))]
pub mod in_memory;
pub mod item_repository;
pub mod settings_repository;
pub mod user_repository;

use aws_sdk_dynamodb::types::AttributeValue;

pub(crate) fn string_value(value: &str) -> AttributeValue {
    AttributeValue::S(value.to_string())
}

pub(crate) fn number_value(value: i64) -> AttributeValue {
    AttributeValue::N(value.to_string())
}
