pub mod bid_service;
pub mod errors;
pub mod item_service;
pub mod settings_service;
pub mod settlement_service;
pub mod user_service;
