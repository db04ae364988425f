use thiserror::Error;

pub const DEFAULT_BIDS_ITEM_INDEX: &str = "itemId-index";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),
}

/// Table names and access lists shared by every Lambda in the workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub users_table: String,
    pub items_table: String,
    pub bids_table: String,
    pub bids_item_index: String,
    pub settings_table: String,
    pub admin_users: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(AppConfig {
            users_table: required("USERS_TABLE")?,
            items_table: required("ITEMS_TABLE")?,
            bids_table: required("BIDS_TABLE")?,
            settings_table: required("SETTINGS_TABLE")?,
            bids_item_index: lookup("BIDS_ITEM_INDEX")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BIDS_ITEM_INDEX.to_string()),
            admin_users: lookup("ADMIN_USERS")
                .map(|value| parse_admin_users(&value))
                .unwrap_or_default(),
        })
    }
}

fn parse_admin_users(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
