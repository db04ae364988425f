use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;

pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use shared::config::AppConfig;
use shared::repositories::bid_repository::DynamoDbBidRepository;
use shared::repositories::item_repository::DynamoDbItemRepository;
use shared::repositories::settings_repository::DynamoDbSettingsRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::bid_service::BidService;
use shared::services::item_service::ItemService;
use shared::services::settings_service::SettingsService;
use shared::services::user_service::UserService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    let app_config = AppConfig::from_env()?;

    // Set up services
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let user_repository = Arc::new(DynamoDbUserRepository::new(
        client.clone(),
        &app_config.users_table,
    ));
    let item_repository = Arc::new(DynamoDbItemRepository::new(
        client.clone(),
        &app_config.items_table,
    ));
    let bid_repository = Arc::new(DynamoDbBidRepository::new(
        client.clone(),
        &app_config.bids_table,
        &app_config.bids_item_index,
    ));
    let settings_repository = Arc::new(DynamoDbSettingsRepository::new(
        client,
        &app_config.settings_table,
    ));

    let app_state = state::AppState {
        item_service: Arc::new(ItemService::new(item_repository.clone())),
        bid_service: Arc::new(BidService::new(
            item_repository,
            bid_repository,
            user_repository.clone(),
        )),
        user_service: Arc::new(UserService::new(user_repository)),
        settings_service: Arc::new(SettingsService::new(
            settings_repository,
            app_config.admin_users,
        )),
    };

    tracing::info!("Auction API starting");
    run(routes::router(app_state)).await
}
