pub mod bid_service_errors;
pub mod item_service_errors;
pub mod settings_service_errors;
pub mod settlement_service_errors;
pub mod user_service_errors;
