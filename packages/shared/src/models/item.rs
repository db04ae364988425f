use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Ongoing,
    Completed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Ongoing => "ongoing",
            ItemStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ongoing" => Some(ItemStatus::Ongoing),
            "completed" => Some(ItemStatus::Completed),
            _ => None,
        }
    }
}

/// An auction listing. One DynamoDB item keyed by `itemId`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: String,
    pub created_by: String,
    pub name: String,
    pub about: String,
    pub photo: String,
    pub starting_price: i64,
    /// Auction length as an hour count, e.g. "24h".
    pub expiration_time: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    pub status: ItemStatus,
    pub highest_bid: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_bidder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_bid_timestamp: Option<i64>,
}

impl Item {
    pub fn new(
        created_by: &str,
        name: &str,
        about: &str,
        photo: &str,
        starting_price: i64,
        expiration_time: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Item {
            item_id: Uuid::new_v4().to_string(),
            created_by: created_by.to_string(),
            name: name.to_string(),
            about: about.to_string(),
            photo: photo.to_string(),
            starting_price,
            expiration_time: expiration_time.to_string(),
            created_at: now.timestamp_millis(),
            status: ItemStatus::Ongoing,
            highest_bid: 0,
            highest_bidder: None,
            last_bid_timestamp: None,
        }
    }

    /// Closing time in epoch milliseconds, `None` when `expiration_time` is malformed
    /// or too large to represent.
    pub fn expires_at(&self) -> Option<i64> {
        let hours = parse_expiration_hours(&self.expiration_time)?;
        let length = Duration::try_hours(hours)?;
        self.created_at.checked_add(length.num_milliseconds())
    }

    /// An item with an unreadable duration is treated as already expired so the
    /// sweep can close it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => expires_at <= now.timestamp_millis(),
            None => true,
        }
    }

    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.status == ItemStatus::Ongoing && !self.is_expired(now)
    }
}

/// Parses "Nh" (e.g. "24h") into an hour count. N must be a positive integer.
pub fn parse_expiration_hours(value: &str) -> Option<i64> {
    let hours = value.trim().strip_suffix('h')?;
    if hours.is_empty() || !hours.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    hours.parse::<i64>().ok().filter(|h| *h > 0)
}
