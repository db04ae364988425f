pub mod bid_repository_errors;
pub mod item_repository_errors;
pub mod settings_repository_errors;
pub mod user_repository_errors;
