use std::sync::Arc;

use aws_lambda_events::event::cloudwatch_events::CloudWatchEvent;
use chrono::Utc;
use lambda_runtime::Error;
use shared::config::AppConfig;
use shared::repositories::bid_repository::DynamoDbBidRepository;
use shared::repositories::item_repository::DynamoDbItemRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::settlement_service::{SettlementReport, SettlementService};
use tracing::{error, info, warn};

/// Runs the settlement sweep on every scheduled tick.
#[derive(Clone)]
pub struct StatusChecker {
    service: SettlementService,
}

impl StatusChecker {
    pub fn new(client: aws_sdk_dynamodb::Client, config: &AppConfig) -> Self {
        let items = Arc::new(DynamoDbItemRepository::new(
            client.clone(),
            &config.items_table,
        ));
        let bids = Arc::new(DynamoDbBidRepository::new(
            client.clone(),
            &config.bids_table,
            &config.bids_item_index,
        ));
        let users = Arc::new(DynamoDbUserRepository::new(client, &config.users_table));
        Self::with_service(SettlementService::new(items, bids, users))
    }

    pub fn with_service(service: SettlementService) -> Self {
        Self { service }
    }

    pub async fn process_event(&self, event: CloudWatchEvent) -> Result<SettlementReport, Error> {
        info!(
            "Sweep triggered by {:?} ({:?})",
            event.source, event.detail_type
        );

        let report = self
            .service
            .settle_expired_items(Utc::now())
            .await
            .map_err(|e| {
                error!("Sweep aborted: {}", e);
                e
            })?;

        if report.failures > 0 {
            warn!(
                "Sweep finished with {} failed item(s): {:?}",
                report.failures, report
            );
        } else {
            info!("Sweep finished: {:?}", report);
        }

        Ok(report)
    }
}
