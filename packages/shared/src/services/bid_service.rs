use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::models::bid::{last_bid_timestamp, total_for_bidder, BidRecord};
use crate::models::item::Item;
use crate::models::requests::BidItemRequest;
use crate::models::settings::AuctionSettings;
use crate::repositories::bid_repository::BidRepository;
use crate::repositories::errors::item_repository_errors::ItemRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::item_repository::ItemRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::bid_service_errors::BidServiceError;

/// Outcome of an accepted bid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBid {
    pub bid: BidRecord,
    pub item: Item,
    pub total_bid_amount: i64,
    pub balance: i64,
}

#[derive(Clone)]
pub struct BidService {
    items: Arc<dyn ItemRepository + Send + Sync>,
    bids: Arc<dyn BidRepository + Send + Sync>,
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl BidService {
    pub fn new(
        items: Arc<dyn ItemRepository + Send + Sync>,
        bids: Arc<dyn BidRepository + Send + Sync>,
        users: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        BidService { items, bids, users }
    }

    pub async fn place_bid(
        &self,
        bidder_id: &str,
        request: &BidItemRequest,
        settings: &AuctionSettings,
        now: DateTime<Utc>,
    ) -> Result<PlacedBid, BidServiceError> {
        let item_id = request.item_id.trim();
        let amount = request.amount;

        if bidder_id.is_empty() || item_id.is_empty() {
            return Err(BidServiceError::ValidationError(
                "Bidder ID or item ID cannot be empty".to_string(),
            ));
        }

        if amount <= 0 {
            return Err(BidServiceError::ValidationError(
                "Bid amount must be positive".to_string(),
            ));
        }

        let item = self
            .items
            .get_item(item_id)
            .await?
            .ok_or(BidServiceError::ItemNotFound)?;

        if !item.is_open(now) {
            return Err(BidServiceError::AuctionClosed);
        }

        if item.created_by == bidder_id {
            return Err(BidServiceError::OwnItem);
        }

        let bidder = self.users.get_user_by_id(bidder_id).await?;
        if bidder.balance < amount {
            return Err(BidServiceError::InsufficientBalance {
                balance: bidder.balance,
                amount,
            });
        }

        let existing_bids = self.bids.get_bids_for_item(item_id).await?;
        let total = total_for_bidder(&existing_bids, bidder_id) + amount;
        let minimum = minimum_total(&item);
        if total < minimum {
            return Err(BidServiceError::BidTooLow { total, minimum });
        }

        let now_millis = now.timestamp_millis();
        if let Some(last) = last_bid_timestamp(&existing_bids, bidder_id) {
            let cooldown_millis = settings.bid_cooldown_seconds.saturating_mul(1000);
            let elapsed = now_millis.saturating_sub(last);
            if elapsed < cooldown_millis {
                let remaining = cooldown_millis.saturating_sub(elapsed);
                return Err(BidServiceError::TooFrequent {
                    retry_after_seconds: remaining.saturating_add(999) / 1000,
                });
            }
        }

        let updated_bidder = self
            .users
            .debit_balance(bidder_id, amount)
            .await
            .map_err(|e| match e {
                UserRepositoryError::InsufficientBalance => BidServiceError::InsufficientBalance {
                    balance: bidder.balance,
                    amount,
                },
                other => BidServiceError::from(other),
            })?;

        let updated_item = match self
            .items
            .record_highest_bid(item_id, bidder_id, total, now_millis)
            .await
        {
            Ok(updated_item) => updated_item,
            Err(e) => {
                self.refund_debit(bidder_id, amount).await;
                return Err(self.explain_rejected_update(item_id, total, now, e).await);
            }
        };

        let bid = BidRecord::new(item_id, bidder_id, amount, now);
        if let Err(e) = self.bids.create_bid(&bid).await {
            error!(
                "Item {} now shows {} from {} but the bid record was not written: {}",
                item_id, total, bidder_id, e
            );
            return Err(BidServiceError::from(e));
        }

        info!(
            "Accepted bid {} on item {}: {} adds {} (total {})",
            bid.bid_id, item_id, bidder_id, amount, total
        );

        Ok(PlacedBid {
            bid,
            item: updated_item,
            total_bid_amount: total,
            balance: updated_bidder.balance,
        })
    }

    pub async fn get_total_bid_amount(
        &self,
        bidder_id: &str,
        item_id: &str,
    ) -> Result<i64, BidServiceError> {
        if bidder_id.is_empty() || item_id.is_empty() {
            return Err(BidServiceError::ValidationError(
                "Bidder ID or item ID cannot be empty".to_string(),
            ));
        }

        let bids = self.bids.get_bids_for_item(item_id).await?;
        let total = total_for_bidder(&bids, bidder_id);
        debug!("User {} has bid {} on item {}", bidder_id, total, item_id);
        Ok(total)
    }

    async fn refund_debit(&self, bidder_id: &str, amount: i64) {
        if let Err(e) = self.users.credit_balance(bidder_id, amount).await {
            error!(
                "Failed to return {} to {} after a rejected bid: {}",
                amount, bidder_id, e
            );
        }
    }

    /// Turns a lost conditional write on the item into the rejection a fresh read implies.
    async fn explain_rejected_update(
        &self,
        item_id: &str,
        total: i64,
        now: DateTime<Utc>,
        error: ItemRepositoryError,
    ) -> BidServiceError {
        if !matches!(error, ItemRepositoryError::ConditionFailed) {
            return BidServiceError::from(error);
        }

        warn!("Bid of {} on item {} lost a concurrent update", total, item_id);
        match self.items.get_item(item_id).await {
            Ok(Some(item)) if item.is_open(now) => BidServiceError::BidTooLow {
                total,
                minimum: minimum_total(&item),
            },
            Ok(Some(_)) => BidServiceError::AuctionClosed,
            Ok(None) => BidServiceError::ItemNotFound,
            Err(e) => BidServiceError::from(e),
        }
    }
}

/// Smallest cumulative amount that can take the lead on `item`.
fn minimum_total(item: &Item) -> i64 {
    item.starting_price.max(item.highest_bid.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bid::BidStatus;
    use crate::models::item::ItemStatus;
    use crate::repositories::in_memory::{
        user_with_balance, InMemoryBidRepository, InMemoryItemRepository, InMemoryUserRepository,
    };
    use crate::repositories::item_repository::MockItemRepository;
    use chrono::Duration;

    struct Fixture {
        service: BidService,
        items: Arc<InMemoryItemRepository>,
        bids: Arc<InMemoryBidRepository>,
        users: Arc<InMemoryUserRepository>,
        item: Item,
        now: DateTime<Utc>,
    }

    fn fixture() -> Fixture {
        let now = Utc::now();
        let item = Item::new(
            "seller",
            "Bike",
            "Road bike",
            "bike.png",
            50,
            "24h",
            now - Duration::hours(1),
        );
        let items = Arc::new(InMemoryItemRepository::with_items(vec![item.clone()]));
        let bids = Arc::new(InMemoryBidRepository::new());
        let users = Arc::new(InMemoryUserRepository::with_users(vec![
            user_with_balance("seller", 0),
            user_with_balance("alice", 500),
            user_with_balance("bob", 500),
        ]));
        let service = BidService::new(items.clone(), bids.clone(), users.clone());
        Fixture {
            service,
            items,
            bids,
            users,
            item,
            now,
        }
    }

    fn bid_request(item_id: &str, amount: i64) -> BidItemRequest {
        BidItemRequest {
            item_id: item_id.to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_place_bid_success_updates_everything() {
        let f = fixture();

        let placed = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 60),
                &AuctionSettings::default(),
                f.now,
            )
            .await
            .unwrap();

        assert_eq!(placed.total_bid_amount, 60);
        assert_eq!(placed.balance, 440);
        assert_eq!(placed.bid.status, BidStatus::Pending);
        assert_eq!(f.users.balance_of("alice"), Some(440));

        let stored = f.items.stored(&f.item.item_id).unwrap();
        assert_eq!(stored.highest_bid, 60);
        assert_eq!(stored.highest_bidder.as_deref(), Some("alice"));
        assert_eq!(stored.last_bid_timestamp, Some(f.now.timestamp_millis()));
        assert_eq!(f.bids.all().len(), 1);
    }

    #[tokio::test]
    async fn test_bids_accumulate_per_bidder() {
        let f = fixture();
        let settings = AuctionSettings::default();

        f.service
            .place_bid("alice", &bid_request(&f.item.item_id, 60), &settings, f.now)
            .await
            .unwrap();
        f.service
            .place_bid(
                "bob",
                &bid_request(&f.item.item_id, 70),
                &settings,
                f.now + Duration::seconds(1),
            )
            .await
            .unwrap();
        // alice tops up 20: cumulative 80 beats bob's 70
        let placed = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 20),
                &settings,
                f.now + Duration::seconds(10),
            )
            .await
            .unwrap();

        assert_eq!(placed.total_bid_amount, 80);
        assert_eq!(placed.item.highest_bidder.as_deref(), Some("alice"));
        assert_eq!(
            f.service
                .get_total_bid_amount("alice", &f.item.item_id)
                .await
                .unwrap(),
            80
        );
        assert_eq!(f.users.balance_of("alice"), Some(420));
    }

    #[tokio::test]
    async fn test_rejects_missing_item() {
        let f = fixture();

        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request("missing", 60),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(result, Err(BidServiceError::ItemNotFound)));
    }

    #[tokio::test]
    async fn test_rejects_completed_item() {
        let f = fixture();
        f.items.mark_completed(&f.item.item_id).await.unwrap();

        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 60),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(result, Err(BidServiceError::AuctionClosed)));
    }

    #[tokio::test]
    async fn test_rejects_expired_item_not_yet_swept() {
        let f = fixture();

        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 60),
                &AuctionSettings::default(),
                f.now + Duration::hours(24),
            )
            .await;

        assert!(matches!(result, Err(BidServiceError::AuctionClosed)));
        assert_eq!(
            f.items.stored(&f.item.item_id).unwrap().status,
            ItemStatus::Ongoing
        );
    }

    #[tokio::test]
    async fn test_rejects_owner_bid() {
        let f = fixture();

        let result = f
            .service
            .place_bid(
                "seller",
                &bid_request(&f.item.item_id, 60),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(result, Err(BidServiceError::OwnItem)));
    }

    #[tokio::test]
    async fn test_rejects_insufficient_balance() {
        let f = fixture();

        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 501),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(
            result,
            Err(BidServiceError::InsufficientBalance {
                balance: 500,
                amount: 501
            })
        ));
        assert_eq!(f.users.balance_of("alice"), Some(500));
    }

    #[tokio::test]
    async fn test_rejects_below_starting_price() {
        let f = fixture();

        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 49),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(
            result,
            Err(BidServiceError::BidTooLow {
                total: 49,
                minimum: 50
            })
        ));
    }

    #[tokio::test]
    async fn test_rejects_total_not_above_highest_bid() {
        let f = fixture();
        let settings = AuctionSettings::default();
        f.service
            .place_bid("alice", &bid_request(&f.item.item_id, 100), &settings, f.now)
            .await
            .unwrap();

        let result = f
            .service
            .place_bid("bob", &bid_request(&f.item.item_id, 100), &settings, f.now)
            .await;

        assert!(matches!(
            result,
            Err(BidServiceError::BidTooLow {
                total: 100,
                minimum: 101
            })
        ));
        assert_eq!(f.users.balance_of("bob"), Some(500));
    }

    #[tokio::test]
    async fn test_rejects_rapid_rebid() {
        let f = fixture();
        let settings = AuctionSettings::default();
        f.service
            .place_bid("alice", &bid_request(&f.item.item_id, 60), &settings, f.now)
            .await
            .unwrap();

        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 10),
                &settings,
                f.now + Duration::milliseconds(4_200),
            )
            .await;

        assert!(matches!(
            result,
            Err(BidServiceError::TooFrequent {
                retry_after_seconds: 1
            })
        ));

        let later = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 10),
                &settings,
                f.now + Duration::seconds(5),
            )
            .await;
        assert!(later.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_non_positive_amount() {
        let f = fixture();

        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 0),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(result, Err(BidServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_lost_item_update_refunds_debit() {
        let f = fixture();
        let item = f.item.clone();
        let raced = Item {
            highest_bid: 1_000,
            highest_bidder: Some("bob".to_string()),
            ..item.clone()
        };

        let mut items = MockItemRepository::new();
        let mut reads = 0;
        items.expect_get_item().returning(move |_| {
            reads += 1;
            // first read sees the item before a concurrent bid lands
            if reads == 1 {
                Ok(Some(item.clone()))
            } else {
                Ok(Some(raced.clone()))
            }
        });
        items
            .expect_record_highest_bid()
            .times(1)
            .returning(|_, _, _, _| Err(ItemRepositoryError::ConditionFailed));

        let service = BidService::new(Arc::new(items), f.bids.clone(), f.users.clone());

        let result = service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 60),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(
            result,
            Err(BidServiceError::BidTooLow {
                total: 60,
                minimum: 1_001
            })
        ));
        assert_eq!(f.users.balance_of("alice"), Some(500));
        assert!(f.bids.all().is_empty());
    }

    #[tokio::test]
    async fn test_closed_auction_checked_before_ownership() {
        let f = fixture();

        let result = f
            .service
            .place_bid(
                "seller",
                &bid_request(&f.item.item_id, 60),
                &AuctionSettings::default(),
                f.now + Duration::hours(24),
            )
            .await;

        assert!(matches!(result, Err(BidServiceError::AuctionClosed)));
    }

    #[tokio::test]
    async fn test_ownership_checked_before_balance() {
        let f = fixture();

        // seller has no funds either
        let result = f
            .service
            .place_bid(
                "seller",
                &bid_request(&f.item.item_id, 60),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(result, Err(BidServiceError::OwnItem)));
    }

    #[tokio::test]
    async fn test_balance_checked_before_minimum() {
        let f = fixture();
        f.items
            .record_highest_bid(&f.item.item_id, "bob", 1_000, f.now.timestamp_millis())
            .await
            .unwrap();

        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 501),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(
            result,
            Err(BidServiceError::InsufficientBalance {
                balance: 500,
                amount: 501
            })
        ));
    }

    #[tokio::test]
    async fn test_minimum_checked_before_cooldown() {
        let f = fixture();
        let settings = AuctionSettings::default();
        f.service
            .place_bid("alice", &bid_request(&f.item.item_id, 60), &settings, f.now)
            .await
            .unwrap();
        f.service
            .place_bid(
                "bob",
                &bid_request(&f.item.item_id, 100),
                &settings,
                f.now + Duration::seconds(1),
            )
            .await
            .unwrap();

        // 70 in total is below 101 and alice's last bid was 2s ago
        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 10),
                &settings,
                f.now + Duration::seconds(2),
            )
            .await;

        assert!(matches!(
            result,
            Err(BidServiceError::BidTooLow {
                total: 70,
                minimum: 101
            })
        ));
    }

    #[tokio::test]
    async fn test_huge_cooldown_does_not_overflow() {
        let f = fixture();
        let settings = AuctionSettings {
            bid_cooldown_seconds: i64::MAX,
            ..AuctionSettings::default()
        };
        f.service
            .place_bid("alice", &bid_request(&f.item.item_id, 60), &settings, f.now)
            .await
            .unwrap();

        let result = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 10),
                &settings,
                f.now + Duration::seconds(1),
            )
            .await;

        assert!(matches!(result, Err(BidServiceError::TooFrequent { .. })));
    }

    #[tokio::test]
    async fn test_leader_can_raise_own_bid() {
        let f = fixture();
        let settings = AuctionSettings::default();
        f.service
            .place_bid("alice", &bid_request(&f.item.item_id, 60), &settings, f.now)
            .await
            .unwrap();

        let placed = f
            .service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 10),
                &settings,
                f.now + Duration::seconds(10),
            )
            .await
            .unwrap();

        assert_eq!(placed.total_bid_amount, 70);
        assert_eq!(placed.balance, 430);
        let stored = f.items.stored(&f.item.item_id).unwrap();
        assert_eq!(stored.highest_bid, 70);
        assert_eq!(stored.highest_bidder.as_deref(), Some("alice"));
        assert_eq!(f.bids.all().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_item_write_refunds_debit() {
        let f = fixture();
        let item = f.item.clone();

        let mut items = MockItemRepository::new();
        items
            .expect_get_item()
            .returning(move |_| Ok(Some(item.clone())));
        items
            .expect_record_highest_bid()
            .times(1)
            .returning(|_, _, _, _| Err(ItemRepositoryError::DynamoDb("timeout".to_string())));

        let service = BidService::new(Arc::new(items), f.bids.clone(), f.users.clone());

        let result = service
            .place_bid(
                "alice",
                &bid_request(&f.item.item_id, 60),
                &AuctionSettings::default(),
                f.now,
            )
            .await;

        assert!(matches!(result, Err(BidServiceError::RepositoryError(_))));
        assert_eq!(f.users.balance_of("alice"), Some(500));
        assert!(f.bids.all().is_empty());
    }
}
