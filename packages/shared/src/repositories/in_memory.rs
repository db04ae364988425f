//! In-memory repositories with the same conditional-write semantics as the DynamoDB
//! tables. Used by unit tests here and, through the `testing` feature, by the Lambdas.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::bid::{BidRecord, BidStatus};
use crate::models::item::{Item, ItemStatus};
use crate::models::settings::AuctionSettings;
use crate::models::user::User;
use crate::repositories::bid_repository::BidRepository;
use crate::repositories::errors::bid_repository_errors::BidRepositoryError;
use crate::repositories::errors::item_repository_errors::ItemRepositoryError;
use crate::repositories::errors::settings_repository_errors::SettingsRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::item_repository::ItemRepository;
use crate::repositories::settings_repository::SettingsRepository;
use crate::repositories::user_repository::UserRepository;

/// In-memory stand-in with the same conditional semantics as the DynamoDB table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    pub users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let repository = Self::new();
        {
            let mut stored = repository.users.lock().unwrap();
            for user in users {
                stored.insert(user.id.clone(), user);
            }
        }
        repository
    }

    pub fn balance_of(&self, user_id: &str) -> Option<i64> {
        self.users.lock().unwrap().get(user_id).map(|u| u.balance)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.id) {
            return Err(UserRepositoryError::AlreadyExists);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
        self.users
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn credit_balance(
        &self,
        user_id: &str,
        amount: i64,
    ) -> Result<User, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(user_id).ok_or(UserRepositoryError::NotFound)?;
        user.balance += amount;
        Ok(user.clone())
    }

    async fn debit_balance(
        &self,
        user_id: &str,
        amount: i64,
    ) -> Result<User, UserRepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(user_id)
            .ok_or(UserRepositoryError::InsufficientBalance)?;
        if user.balance < amount {
            return Err(UserRepositoryError::InsufficientBalance);
        }
        user.balance -= amount;
        Ok(user.clone())
    }
}

pub fn user_with_balance(id: &str, balance: i64) -> User {
    let mut user = User::new(
        id.to_string(),
        format!("{}@example.com", id),
        "Test".to_string(),
        "User".to_string(),
        chrono::Utc::now(),
    );
    user.balance = balance;
    user
}

#[derive(Default)]
pub struct InMemoryItemRepository {
    pub items: Mutex<HashMap<String, Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        let repository = Self::new();
        {
            let mut stored = repository.items.lock().unwrap();
            for item in items {
                stored.insert(item.item_id.clone(), item);
            }
        }
        repository
    }

    pub fn stored(&self, item_id: &str) -> Option<Item> {
        self.items.lock().unwrap().get(item_id).cloned()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create_item(&self, item: &Item) -> Result<(), ItemRepositoryError> {
        self.items
            .lock()
            .unwrap()
            .insert(item.item_id.clone(), item.clone());
        Ok(())
    }

    async fn get_item(&self, item_id: &str) -> Result<Option<Item>, ItemRepositoryError> {
        Ok(self.stored(item_id))
    }

    async fn list_items(
        &self,
        status: Option<ItemStatus>,
    ) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| status.map_or(true, |s| item.status == s))
            .cloned()
            .collect())
    }

    async fn record_highest_bid(
        &self,
        item_id: &str,
        bidder_id: &str,
        total: i64,
        timestamp: i64,
    ) -> Result<Item, ItemRepositoryError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .get_mut(item_id)
            .ok_or(ItemRepositoryError::ConditionFailed)?;
        if item.status != ItemStatus::Ongoing || item.highest_bid >= total {
            return Err(ItemRepositoryError::ConditionFailed);
        }
        item.highest_bid = total;
        item.highest_bidder = Some(bidder_id.to_string());
        item.last_bid_timestamp = Some(timestamp);
        Ok(item.clone())
    }

    async fn mark_completed(&self, item_id: &str) -> Result<bool, ItemRepositoryError> {
        let mut items = self.items.lock().unwrap();
        match items.get_mut(item_id) {
            Some(item) if item.status == ItemStatus::Ongoing => {
                item.status = ItemStatus::Completed;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryBidRepository {
    pub bids: Mutex<Vec<BidRecord>>,
}

impl InMemoryBidRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bids(bids: Vec<BidRecord>) -> Self {
        Self {
            bids: Mutex::new(bids),
        }
    }

    pub fn all(&self) -> Vec<BidRecord> {
        self.bids.lock().unwrap().clone()
    }
}

#[async_trait]
impl BidRepository for InMemoryBidRepository {
    async fn create_bid(&self, bid: &BidRecord) -> Result<(), BidRepositoryError> {
        self.bids.lock().unwrap().push(bid.clone());
        Ok(())
    }

    async fn get_bids_for_item(
        &self,
        item_id: &str,
    ) -> Result<Vec<BidRecord>, BidRepositoryError> {
        Ok(self
            .bids
            .lock()
            .unwrap()
            .iter()
            .filter(|bid| bid.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn transition_bid_status(
        &self,
        bid_id: &str,
        from: BidStatus,
        to: BidStatus,
    ) -> Result<bool, BidRepositoryError> {
        let mut bids = self.bids.lock().unwrap();
        match bids.iter_mut().find(|bid| bid.bid_id == bid_id) {
            Some(bid) if bid.status == from => {
                bid.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemorySettingsRepository {
    pub settings: Mutex<Option<AuctionSettings>>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn get_settings(&self) -> Result<Option<AuctionSettings>, SettingsRepositoryError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn put_settings(
        &self,
        settings: &AuctionSettings,
    ) -> Result<(), SettingsRepositoryError> {
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}
