//! In-memory subscription repository implementation
//!
//! The write lock over the subscription map is the per-subscription critical
//! section: `record_usage` runs its whole read-modify-write inside it, and
//! concurrent requests carrying the same API key serialize there.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::account::AccountId;
use crate::domain::plan::Plan;
use crate::domain::subscription::{
    Subscription, SubscriptionId, SubscriptionRepository, UsageOutcome,
};
use crate::domain::DomainError;

/// In-memory implementation of SubscriptionRepository
#[derive(Debug)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<HashMap<Uuid, Subscription>>>,
    /// Index for api_key -> subscription ID lookup
    key_index: Arc<RwLock<HashMap<String, Uuid>>>,
    /// Index for account ID -> subscription ID lookup (1:1)
    account_index: Arc<RwLock<HashMap<Uuid, Uuid>>>,
}

impl InMemorySubscriptionRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
            key_index: Arc::new(RwLock::new(HashMap::new())),
            account_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySubscriptionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn get(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.get(&id.as_uuid()).cloned())
    }

    async fn get_by_api_key(&self, api_key: &str) -> Result<Option<Subscription>, DomainError> {
        // Lock order everywhere: subscriptions, then indexes
        let subscriptions = self.subscriptions.read().await;
        let key_index = self.key_index.read().await;

        Ok(key_index
            .get(api_key)
            .and_then(|id| subscriptions.get(id).cloned()))
    }

    async fn get_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Subscription>, DomainError> {
        let subscriptions = self.subscriptions.read().await;
        let account_index = self.account_index.read().await;

        Ok(account_index
            .get(&account_id.as_uuid())
            .and_then(|id| subscriptions.get(id).cloned()))
    }

    async fn create(&self, subscription: Subscription) -> Result<Subscription, DomainError> {
        let mut subscriptions = self.subscriptions.write().await;
        let mut key_index = self.key_index.write().await;
        let mut account_index = self.account_index.write().await;

        let id = subscription.id().as_uuid();
        let account = subscription.account_id().as_uuid();
        let api_key = subscription.api_key().to_string();

        if account_index.contains_key(&account) {
            return Err(DomainError::AlreadySubscribed);
        }

        if key_index.contains_key(&api_key) {
            return Err(DomainError::conflict(
                "API key is already assigned to a subscription",
            ));
        }

        subscriptions.insert(id, subscription.clone());
        key_index.insert(api_key, id);
        account_index.insert(account, id);

        Ok(subscription)
    }

    async fn api_key_exists(&self, api_key: &str) -> Result<bool, DomainError> {
        let key_index = self.key_index.read().await;
        Ok(key_index.contains_key(api_key))
    }

    async fn rotate_key(
        &self,
        id: &SubscriptionId,
        api_key: &str,
    ) -> Result<Subscription, DomainError> {
        let mut subscriptions = self.subscriptions.write().await;
        let mut key_index = self.key_index.write().await;

        if let Some(existing) = key_index.get(api_key) {
            if *existing != id.as_uuid() {
                return Err(DomainError::conflict(
                    "API key is already assigned to a subscription",
                ));
            }
        }

        let subscription = subscriptions.get_mut(&id.as_uuid()).ok_or_else(|| {
            DomainError::not_found(format!("Subscription '{}' not found", id))
        })?;

        key_index.remove(subscription.api_key());
        subscription.set_api_key(api_key);
        key_index.insert(api_key.to_string(), id.as_uuid());

        Ok(subscription.clone())
    }

    async fn record_usage(
        &self,
        id: &SubscriptionId,
        plan: &Plan,
    ) -> Result<(Subscription, UsageOutcome), DomainError> {
        // The transition and the resulting multi-field write happen while
        // the write lock is held; no other updater can interleave.
        let mut subscriptions = self.subscriptions.write().await;

        let subscription = subscriptions.get_mut(&id.as_uuid()).ok_or_else(|| {
            DomainError::not_found(format!("Subscription '{}' not found", id))
        })?;

        // Sticky suspension, re-checked inside the critical section: a
        // caller that raced past its own active check cannot meter a
        // subscription another caller just suspended.
        if !subscription.is_active() {
            return Err(DomainError::SubscriptionSuspended);
        }

        let outcome = subscription.record_usage(plan, chrono::Utc::now());

        Ok((subscription.clone(), outcome))
    }

    async fn set_active(
        &self,
        id: &SubscriptionId,
        active: bool,
    ) -> Result<Subscription, DomainError> {
        let mut subscriptions = self.subscriptions.write().await;

        let subscription = subscriptions.get_mut(&id.as_uuid()).ok_or_else(|| {
            DomainError::not_found(format!("Subscription '{}' not found", id))
        })?;

        subscription.set_active(active);

        Ok(subscription.clone())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.len())
    }
}
