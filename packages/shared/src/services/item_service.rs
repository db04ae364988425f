use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::models::item::{parse_expiration_hours, Item, ItemStatus};
use crate::models::requests::CreateItemRequest;
use crate::models::settings::AuctionSettings;
use crate::repositories::item_repository::ItemRepository;
use crate::services::errors::item_service_errors::ItemServiceError;

#[derive(Clone)]
pub struct ItemService {
    repository: Arc<dyn ItemRepository + Send + Sync>,
}

impl ItemService {
    pub fn new(repository: Arc<dyn ItemRepository + Send + Sync>) -> Self {
        ItemService { repository }
    }

    pub async fn create_item(
        &self,
        owner_id: &str,
        request: &CreateItemRequest,
        settings: &AuctionSettings,
        now: DateTime<Utc>,
    ) -> Result<Item, ItemServiceError> {
        if owner_id.is_empty() {
            return Err(ItemServiceError::ValidationError(
                "Owner ID cannot be empty".to_string(),
            ));
        }

        let name = request.name.trim();
        let about = request.about.trim();
        let photo = request.photo.trim();
        if name.is_empty() || about.is_empty() || photo.is_empty() {
            return Err(ItemServiceError::ValidationError(
                "Name, about, or photo cannot be empty".to_string(),
            ));
        }

        if request.starting_price < 0 {
            return Err(ItemServiceError::ValidationError(
                "Starting price cannot be negative".to_string(),
            ));
        }

        let hours = parse_expiration_hours(&request.expiration_time).ok_or_else(|| {
            ItemServiceError::ValidationError(format!(
                "Invalid expiration time '{}', expected a duration like '24h'",
                request.expiration_time
            ))
        })?;
        if hours > settings.max_expiration_hours {
            return Err(ItemServiceError::ValidationError(format!(
                "Expiration time cannot exceed {}h",
                settings.max_expiration_hours
            )));
        }

        let item = Item::new(
            owner_id,
            name,
            about,
            photo,
            request.starting_price,
            &format!("{}h", hours),
            now,
        );
        if item.expires_at().is_none() {
            return Err(ItemServiceError::ValidationError(format!(
                "Expiration time '{}' is out of range",
                request.expiration_time
            )));
        }
        self.repository.create_item(&item).await?;

        info!("User {} listed item {}", owner_id, item.item_id);
        Ok(item)
    }

    /// Newest first.
    pub async fn get_items(
        &self,
        status: Option<ItemStatus>,
    ) -> Result<Vec<Item>, ItemServiceError> {
        let mut items = self.repository.list_items(status).await?;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!("Fetched {} items", items.len());
        Ok(items)
    }

    pub async fn get_item_by_id(&self, item_id: &str) -> Result<Item, ItemServiceError> {
        if item_id.is_empty() {
            return Err(ItemServiceError::ValidationError(
                "Item ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_item(item_id)
            .await?
            .ok_or(ItemServiceError::ItemNotFound)
    }
}
