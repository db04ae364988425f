pub mod bid;
pub mod item;
pub mod requests;
pub mod settings;
pub mod user;
