use std::sync::Arc;

use shared::services::bid_service::BidService;
use shared::services::item_service::ItemService;
use shared::services::settings_service::SettingsService;
use shared::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub item_service: Arc<ItemService>,
    pub bid_service: Arc<BidService>,
    pub user_service: Arc<UserService>,
    pub settings_service: Arc<SettingsService>,
}
