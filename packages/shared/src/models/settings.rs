use serde::{Deserialize, Serialize};

pub const SETTINGS_ID: &str = "auction";

pub const DEFAULT_BID_COOLDOWN_SECONDS: i64 = 5;
pub const DEFAULT_MAX_EXPIRATION_HOURS: i64 = 168;
pub const DEFAULT_MAX_DEPOSIT_AMOUNT: i64 = 1_000_000;

/// Upper bounds accepted by a settings update.
pub const BID_COOLDOWN_SECONDS_LIMIT: i64 = 86_400;
pub const MAX_EXPIRATION_HOURS_LIMIT: i64 = 87_600;
pub const MAX_DEPOSIT_AMOUNT_LIMIT: i64 = 1_000_000_000_000;

/// Runtime-tunable auction rules, stored as a single record.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuctionSettings {
    pub id: String,
    pub bid_cooldown_seconds: i64,
    pub max_expiration_hours: i64,
    pub max_deposit_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl Default for AuctionSettings {
    fn default() -> Self {
        AuctionSettings {
            id: SETTINGS_ID.to_string(),
            bid_cooldown_seconds: DEFAULT_BID_COOLDOWN_SECONDS,
            max_expiration_hours: DEFAULT_MAX_EXPIRATION_HOURS,
            max_deposit_amount: DEFAULT_MAX_DEPOSIT_AMOUNT,
            updated_at: None,
            updated_by: None,
        }
    }
}
