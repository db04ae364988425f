use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub photo: String,
    pub starting_price: i64,
    #[serde(default)]
    pub expiration_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepositRequest {
    pub amount: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidItemRequest {
    #[serde(default)]
    pub item_id: String,
    pub amount: i64,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub bid_cooldown_seconds: Option<i64>,
    pub max_expiration_hours: Option<i64>,
    pub max_deposit_amount: Option<i64>,
}
