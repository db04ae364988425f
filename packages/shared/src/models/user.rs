use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bidder/seller account. `id` is the Cognito username.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    pub balance: i64,
    pub created_at: i64,
}

impl User {
    pub fn new(
        id: String,
        email: String,
        given_name: String,
        family_name: String,
        now: DateTime<Utc>,
    ) -> Self {
        User {
            id,
            email,
            given_name,
            family_name,
            balance: 0,
            created_at: now.timestamp_millis(),
        }
    }
}
