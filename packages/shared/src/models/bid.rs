use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Pending,
    Completed,
    Refunded,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::Completed => "completed",
            BidStatus::Refunded => "refunded",
        }
    }
}

/// One accepted bid. A bidder's position on an item is the sum of all of their records.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BidRecord {
    pub bid_id: String,
    pub item_id: String,
    pub bidder_id: String,
    pub amount: i64,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub status: BidStatus,
}

impl BidRecord {
    pub fn new(item_id: &str, bidder_id: &str, amount: i64, now: DateTime<Utc>) -> Self {
        BidRecord {
            bid_id: Uuid::new_v4().to_string(),
            item_id: item_id.to_string(),
            bidder_id: bidder_id.to_string(),
            amount,
            timestamp: now.timestamp_millis(),
            status: BidStatus::Pending,
        }
    }
}

/// Sum of `bidder_id`'s bids among `bids`.
pub fn total_for_bidder(bids: &[BidRecord], bidder_id: &str) -> i64 {
    bids.iter()
        .filter(|bid| bid.bidder_id == bidder_id)
        .map(|bid| bid.amount)
        .sum()
}

/// Timestamp of `bidder_id`'s most recent bid among `bids`.
pub fn last_bid_timestamp(bids: &[BidRecord], bidder_id: &str) -> Option<i64> {
    bids.iter()
        .filter(|bid| bid.bidder_id == bidder_id)
        .map(|bid| bid.timestamp)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(bidder_id: &str, amount: i64, timestamp: i64) -> BidRecord {
        BidRecord {
            bid_id: format!("{}-{}", bidder_id, timestamp),
            item_id: "item-1".to_string(),
            bidder_id: bidder_id.to_string(),
            amount,
            timestamp,
            status: BidStatus::Pending,
        }
    }

    #[test]
    fn test_total_for_bidder_sums_only_that_bidder() {
        let bids = vec![bid("alice", 10, 1), bid("bob", 30, 2), bid("alice", 15, 3)];

        assert_eq!(total_for_bidder(&bids, "alice"), 25);
        assert_eq!(total_for_bidder(&bids, "bob"), 30);
        assert_eq!(total_for_bidder(&bids, "carol"), 0);
    }

    #[test]
    fn test_last_bid_timestamp_is_latest() {
        let bids = vec![bid("alice", 10, 100), bid("alice", 15, 50), bid("bob", 1, 900)];

        assert_eq!(last_bid_timestamp(&bids, "alice"), Some(100));
        assert_eq!(last_bid_timestamp(&bids, "carol"), None);
    }

    #[test]
    fn test_new_bid_is_pending() {
        let now = Utc::now();
        let record = BidRecord::new("item-1", "alice", 20, now);

        assert_eq!(record.status, BidStatus::Pending);
        assert_eq!(record.timestamp, now.timestamp_millis());
        assert_eq!(serde_json::to_value(&record).unwrap()["bidderId"], "alice");
    }
}
