use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::models::requests::UpdateSettingsRequest;
use crate::models::settings::{
    AuctionSettings, BID_COOLDOWN_SECONDS_LIMIT, MAX_DEPOSIT_AMOUNT_LIMIT,
    MAX_EXPIRATION_HOURS_LIMIT,
};
use crate::repositories::settings_repository::SettingsRepository;
use crate::services::errors::settings_service_errors::SettingsServiceError;

#[derive(Clone)]
pub struct SettingsService {
    repository: Arc<dyn SettingsRepository + Send + Sync>,
    admin_users: Vec<String>,
}

impl SettingsService {
    pub fn new(
        repository: Arc<dyn SettingsRepository + Send + Sync>,
        admin_users: Vec<String>,
    ) -> Self {
        SettingsService {
            repository,
            admin_users,
        }
    }

    /// Stored settings, or the defaults when nothing has been saved yet.
    pub async fn get_settings(&self) -> Result<AuctionSettings, SettingsServiceError> {
        let settings = self.repository.get_settings().await?;
        if settings.is_none() {
            debug!("No stored auction settings, using defaults");
        }
        Ok(settings.unwrap_or_default())
    }

    pub async fn update_settings(
        &self,
        actor_id: &str,
        request: &UpdateSettingsRequest,
        now: DateTime<Utc>,
    ) -> Result<AuctionSettings, SettingsServiceError> {
        if !self.admin_users.iter().any(|admin| admin == actor_id) {
            return Err(SettingsServiceError::Forbidden(actor_id.to_string()));
        }

        let fields = [
            (
                "bidCooldownSeconds",
                request.bid_cooldown_seconds,
                BID_COOLDOWN_SECONDS_LIMIT,
            ),
            (
                "maxExpirationHours",
                request.max_expiration_hours,
                MAX_EXPIRATION_HOURS_LIMIT,
            ),
            (
                "maxDepositAmount",
                request.max_deposit_amount,
                MAX_DEPOSIT_AMOUNT_LIMIT,
            ),
        ];
        if fields.iter().all(|(_, value, _)| value.is_none()) {
            return Err(SettingsServiceError::ValidationError(
                "No settings provided".to_string(),
            ));
        }
        for (name, value, limit) in fields {
            if let Some(value) = value {
                if value <= 0 || value > limit {
                    return Err(SettingsServiceError::ValidationError(format!(
                        "{} must be between 1 and {}",
                        name, limit
                    )));
                }
            }
        }

        let mut settings = self.get_settings().await?;
        if let Some(value) = request.bid_cooldown_seconds {
            settings.bid_cooldown_seconds = value;
        }
        if let Some(value) = request.max_expiration_hours {
            settings.max_expiration_hours = value;
        }
        if let Some(value) = request.max_deposit_amount {
            settings.max_deposit_amount = value;
        }
        settings.updated_at = Some(now.timestamp_millis());
        settings.updated_by = Some(actor_id.to_string());

        self.repository.put_settings(&settings).await?;
        info!("Auction settings updated by {}: {:?}", actor_id, settings);
        Ok(settings)
    }
}
