use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::models::bid::BidStatus;
use crate::models::item::{Item, ItemStatus};
use crate::repositories::bid_repository::BidRepository;
use crate::repositories::item_repository::ItemRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::settlement_service_errors::SettlementServiceError;

/// Totals from one sweep run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    pub scanned: usize,
    pub settled: usize,
    pub refunds: usize,
    pub failures: usize,
}

#[derive(Clone)]
pub struct SettlementService {
    items: Arc<dyn ItemRepository + Send + Sync>,
    bids: Arc<dyn BidRepository + Send + Sync>,
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl SettlementService {
    pub fn new(
        items: Arc<dyn ItemRepository + Send + Sync>,
        bids: Arc<dyn BidRepository + Send + Sync>,
        users: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        SettlementService { items, bids, users }
    }

    /// Closes every ongoing item whose auction has run out. A failure on one item is
    /// logged and counted; the rest are still processed.
    pub async fn settle_expired_items(
        &self,
        now: DateTime<Utc>,
    ) -> Result<SettlementReport, SettlementServiceError> {
        let ongoing = self.items.list_items(Some(ItemStatus::Ongoing)).await?;
        let mut report = SettlementReport {
            scanned: ongoing.len(),
            ..SettlementReport::default()
        };

        for item in ongoing.iter().filter(|item| item.is_expired(now)) {
            match self.settle_item(item).await {
                Ok(Some(refunds)) => {
                    report.settled += 1;
                    report.refunds += refunds;
                }
                Ok(None) => debug!("Item {} was already closed", item.item_id),
                Err(e) => {
                    error!("Failed to settle item {}: {}", item.item_id, e);
                    report.failures += 1;
                }
            }
        }

        info!(
            "Sweep finished: {} ongoing, {} settled, {} refunds, {} failures",
            report.scanned, report.settled, report.refunds, report.failures
        );
        Ok(report)
    }

    /// Settles the pending bids of `item`, then closes it. Bid transitions are
    /// conditional on `pending`, so a rerun after a partial failure (or an overlapping
    /// sweep) never pays a refund twice. Returns the number of refunded bidders, or
    /// `None` if another run closed the item first.
    async fn settle_item(&self, item: &Item) -> Result<Option<usize>, SettlementServiceError> {
        let bids = self.bids.get_bids_for_item(&item.item_id).await?;
        let winner = item.highest_bidder.as_deref();

        let mut refunds: BTreeMap<&str, i64> = BTreeMap::new();
        for bid in bids.iter().filter(|bid| bid.status == BidStatus::Pending) {
            if Some(bid.bidder_id.as_str()) == winner {
                self.bids
                    .transition_bid_status(&bid.bid_id, BidStatus::Pending, BidStatus::Completed)
                    .await?;
            } else if self
                .bids
                .transition_bid_status(&bid.bid_id, BidStatus::Pending, BidStatus::Refunded)
                .await?
            {
                if let Err(e) = self.users.credit_balance(&bid.bidder_id, bid.amount).await {
                    self.reopen_bid(&bid.bid_id).await;
                    return Err(e.into());
                }
                *refunds.entry(bid.bidder_id.as_str()).or_default() += bid.amount;
            }
        }

        for (bidder_id, refund) in &refunds {
            debug!(
                "Refunded {} to {} for item {}",
                refund, bidder_id, item.item_id
            );
        }

        if !self.items.mark_completed(&item.item_id).await? {
            return Ok(None);
        }

        match winner {
            Some(winner) => info!(
                "Item {} sold to {} for {}",
                item.item_id, winner, item.highest_bid
            ),
            None => info!("Item {} closed without bids", item.item_id),
        }

        Ok(Some(refunds.len()))
    }

    /// Puts a bid whose refund could not be paid back to `pending` so the next run
    /// retries it.
    async fn reopen_bid(&self, bid_id: &str) {
        match self
            .bids
            .transition_bid_status(bid_id, BidStatus::Refunded, BidStatus::Pending)
            .await
        {
            Ok(true) => debug!("Bid {} reopened after a failed refund", bid_id),
            Ok(false) => error!("Bid {} changed before it could be reopened", bid_id),
            Err(e) => error!("Bid {} is marked refunded but was not paid: {}", bid_id, e),
        }
    }
}
