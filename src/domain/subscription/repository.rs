//! Subscription repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Subscription, SubscriptionId, UsageOutcome};
use crate::domain::account::AccountId;
use crate::domain::plan::Plan;
use crate::domain::DomainError;

/// Repository trait for subscription storage
///
/// Mutating operations are field-scoped: key rotation writes only the key,
/// usage accounting writes only the counter/window/active fields, so the two
/// can race on one subscription without clobbering each other.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync + Debug {
    /// Get a subscription by its ID
    async fn get(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Look up a subscription by exact API key match
    async fn get_by_api_key(&self, api_key: &str) -> Result<Option<Subscription>, DomainError>;

    /// Get the subscription owned by an account, if any
    async fn get_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Subscription>, DomainError>;

    /// Persist a new subscription
    ///
    /// Fails with `AlreadySubscribed` if the account already owns one, or
    /// `Conflict` if the API key is already assigned.
    async fn create(&self, subscription: Subscription) -> Result<Subscription, DomainError>;

    /// Check whether an API key is already assigned to any subscription
    async fn api_key_exists(&self, api_key: &str) -> Result<bool, DomainError>;

    /// Replace the API key of a subscription, touching nothing else
    async fn rotate_key(
        &self,
        id: &SubscriptionId,
        api_key: &str,
    ) -> Result<Subscription, DomainError>;

    /// Apply one metered request as a single serialized unit
    ///
    /// The window-reset check, the increment, the quota check and the
    /// resulting multi-field write happen atomically per subscription: two
    /// concurrent callers can never both observe the same pre-increment
    /// count. A suspended subscription fails with `SubscriptionSuspended`
    /// without being touched. Returns the updated subscription and the
    /// accounting outcome.
    async fn record_usage(
        &self,
        id: &SubscriptionId,
        plan: &Plan,
    ) -> Result<(Subscription, UsageOutcome), DomainError>;

    /// Set the active flag (deliberate reactivation/suspension)
    async fn set_active(
        &self,
        id: &SubscriptionId,
        active: bool,
    ) -> Result<Subscription, DomainError>;

    /// Count stored subscriptions
    async fn count(&self) -> Result<usize, DomainError>;
}
