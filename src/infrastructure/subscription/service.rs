//! Subscription lifecycle service
//!
//! Owns subscription state: activation, key rotation, usage accounting,
//! window reset and quota-exceeded suspension.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::account::AccountId;
use crate::domain::plan::{Plan, PlanRepository};
use crate::domain::subscription::{
    Subscription, SubscriptionId, SubscriptionRepository, UsageOutcome,
};
use crate::domain::DomainError;
use crate::infrastructure::key::KeyGenerator;

/// Slug of the tier assigned when a subscription is created without one
const DEFAULT_PLAN_SLUG: &str = "free";

/// Subscription lifecycle manager
#[derive(Debug)]
pub struct SubscriptionService<R, P>
where
    R: SubscriptionRepository,
    P: PlanRepository,
{
    subscriptions: Arc<R>,
    plans: Arc<P>,
    key_generator: KeyGenerator,
}

impl<R: SubscriptionRepository, P: PlanRepository> SubscriptionService<R, P> {
    /// Create a new subscription service
    pub fn new(subscriptions: Arc<R>, plans: Arc<P>) -> Self {
        Self {
            subscriptions,
            plans,
            key_generator: KeyGenerator::new(),
        }
    }

    /// Create with a custom key generator
    pub fn with_key_generator(mut self, key_generator: KeyGenerator) -> Self {
        self.key_generator = key_generator;
        self
    }

    /// Create a subscription for an account
    ///
    /// Accounts own at most one subscription. Without a slug the
    /// default tier is assigned; its absence is a configuration fault.
    pub async fn create(
        &self,
        account_id: AccountId,
        plan_slug: Option<&str>,
    ) -> Result<Subscription, DomainError> {
        if self
            .subscriptions
            .get_by_account(&account_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadySubscribed);
        }

        let plan = self.resolve_plan(plan_slug).await?;
        let api_key = self.allocate_key().await?;

        let subscription = Subscription::new(account_id, &plan, api_key);
        let created = self.subscriptions.create(subscription).await?;

        info!(
            subscription_id = %created.id(),
            plan = %plan.slug(),
            "Subscription created"
        );

        Ok(created)
    }

    /// Replace the API key of an account's subscription
    ///
    /// Each call yields a fresh unique key; a retired key is never reused
    /// and stops authenticating as soon as the rotation is persisted. Only
    /// the key field is written.
    pub async fn rotate_key(&self, account_id: AccountId) -> Result<Subscription, DomainError> {
        let subscription = self
            .subscriptions
            .get_by_account(&account_id)
            .await?
            .ok_or_else(|| DomainError::validation("Account has no subscription"))?;

        let api_key = self.allocate_key().await?;
        let rotated = self.subscriptions.rotate_key(subscription.id(), &api_key).await?;

        info!(subscription_id = %rotated.id(), "API key rotated");

        Ok(rotated)
    }

    /// Apply one metered request to a subscription
    ///
    /// Suspension is sticky: an inactive subscription fails here without
    /// touching the counter, even when its usage window has since lapsed.
    /// The quota-crossing request itself is recorded together with the
    /// suspension flip, then reported as `QuotaExceeded`.
    pub async fn record_usage(&self, id: &SubscriptionId) -> Result<Subscription, DomainError> {
        let subscription = self
            .subscriptions
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Subscription '{}' not found", id)))?;

        if !subscription.is_active() {
            return Err(DomainError::SubscriptionSuspended);
        }

        let plan = self.plan_of(&subscription).await?;
        let (updated, outcome) = self.subscriptions.record_usage(id, &plan).await?;

        match outcome {
            UsageOutcome::Recorded => Ok(updated),
            UsageOutcome::QuotaExceeded => {
                warn!(
                    subscription_id = %id,
                    usage_count = updated.usage_count(),
                    quota = plan.api_quota(),
                    "Subscription suspended: quota exceeded"
                );
                Err(DomainError::QuotaExceeded)
            }
        }
    }

    /// Resolve an API key to its subscription and meter the request
    ///
    /// The authentication path: exact key match, active check, then usage
    /// accounting. A valid key on a suspended subscription is reported
    /// distinctly from an unknown key.
    pub async fn authenticate(&self, api_key: &str) -> Result<Subscription, DomainError> {
        let subscription = self
            .subscriptions
            .get_by_api_key(api_key)
            .await?
            .ok_or(DomainError::InvalidCredential)?;

        if !subscription.is_active() {
            return Err(DomainError::SubscriptionSuspended);
        }

        self.record_usage(subscription.id()).await
    }

    /// Get a subscription by ID
    pub async fn get(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        self.subscriptions.get(id).await
    }

    /// Get the subscription owned by an account
    pub async fn get_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Subscription>, DomainError> {
        self.subscriptions.get_by_account(account_id).await
    }

    /// Resolve the plan a subscription is metered against
    pub async fn plan_of(&self, subscription: &Subscription) -> Result<Plan, DomainError> {
        self.plans
            .get_by_slug(subscription.plan_slug().as_str())
            .await?
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "Plan '{}' referenced by subscription '{}' is not registered",
                    subscription.plan_slug(),
                    subscription.id()
                ))
            })
    }

    /// List all registered plans
    pub async fn list_plans(&self) -> Result<Vec<Plan>, DomainError> {
        self.plans.list().await
    }

    /// Diagnostic read: has the subscription used up its quota?
    pub async fn is_quota_exceeded(&self, id: &SubscriptionId) -> Result<bool, DomainError> {
        let subscription = self
            .subscriptions
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Subscription '{}' not found", id)))?;
        let plan = self.plan_of(&subscription).await?;

        Ok(subscription.is_quota_exceeded(&plan))
    }

    /// Whole days until the subscription's usage window resets
    pub async fn days_until_reset(&self, id: &SubscriptionId) -> Result<i64, DomainError> {
        let subscription = self
            .subscriptions
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Subscription '{}' not found", id)))?;

        Ok(subscription.days_until_reset(Utc::now()))
    }

    /// Deliberate status change: suspend or reactivate a subscription
    pub async fn set_active(
        &self,
        id: &SubscriptionId,
        active: bool,
    ) -> Result<Subscription, DomainError> {
        info!(subscription_id = %id, active, "Subscription status changed");
        self.subscriptions.set_active(id, active).await
    }

    /// Count stored subscriptions
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.subscriptions.count().await
    }

    async fn resolve_plan(&self, plan_slug: Option<&str>) -> Result<Plan, DomainError> {
        match plan_slug {
            Some(slug) => self
                .plans
                .get_by_slug(slug)
                .await?
                .ok_or_else(|| DomainError::plan_not_found(slug)),
            None => self
                .plans
                .get_by_slug(DEFAULT_PLAN_SLUG)
                .await?
                .ok_or_else(|| {
                    DomainError::configuration(format!(
                        "Default '{}' plan is not registered",
                        DEFAULT_PLAN_SLUG
                    ))
                }),
        }
    }

    async fn allocate_key(&self) -> Result<String, DomainError> {
        let subscriptions = &self.subscriptions;

        self.key_generator
            .generate_unique(|candidate| async move {
                subscriptions.api_key_exists(&candidate).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::domain::plan::PlanSlug;
    use crate::infrastructure::plan::InMemoryPlanRepository;
    use crate::infrastructure::subscription::InMemorySubscriptionRepository;

    type TestService = SubscriptionService<InMemorySubscriptionRepository, InMemoryPlanRepository>;

    fn plan(slug: &str, quota: u32, period_days: u32) -> Plan {
        Plan::new(PlanSlug::new(slug).unwrap(), slug.to_uppercase(), quota, period_days).unwrap()
    }

    fn service_with_plans(plans: Vec<Plan>) -> TestService {
        SubscriptionService::new(
            Arc::new(InMemorySubscriptionRepository::new()),
            Arc::new(InMemoryPlanRepository::with_plans(plans)),
        )
    }

    fn default_service() -> TestService {
        service_with_plans(vec![plan("free", 3, 30), plan("pro", 1_000, 30)])
    }

    #[tokio::test]
    async fn test_create_assigns_default_plan() {
        let service = default_service();

        let sub = service.create(AccountId::new(), None).await.unwrap();

        assert_eq!(sub.plan_slug().as_str(), "free");
        assert_eq!(sub.usage_count(), 0);
        assert!(sub.is_active());
        assert_eq!(sub.api_key().len(), 64);
    }

    #[tokio::test]
    async fn test_create_with_named_plan() {
        let service = default_service();

        let sub = service
            .create(AccountId::new(), Some("pro"))
            .await
            .unwrap();

        assert_eq!(sub.plan_slug().as_str(), "pro");
    }

    #[tokio::test]
    async fn test_create_rejects_second_subscription() {
        let service = default_service();
        let account = AccountId::new();

        service.create(account, None).await.unwrap();

        let result = service.create(account, Some("pro")).await;
        assert!(matches!(result, Err(DomainError::AlreadySubscribed)));
    }

    #[tokio::test]
    async fn test_create_with_unknown_plan() {
        let service = default_service();

        let result = service.create(AccountId::new(), Some("gold")).await;
        assert!(matches!(
            result,
            Err(DomainError::PlanNotFound { slug }) if slug == "gold"
        ));
    }

    #[tokio::test]
    async fn test_create_without_default_plan_is_configuration_error() {
        let service = service_with_plans(vec![plan("pro", 1_000, 30)]);

        let result = service.create(AccountId::new(), None).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rotate_key_yields_fresh_key() {
        let service = default_service();
        let sub = service.create(AccountId::new(), None).await.unwrap();
        let old_key = sub.api_key().to_string();

        let rotated = service.rotate_key(*sub.account_id()).await.unwrap();

        assert_ne!(rotated.api_key(), old_key);
        assert_eq!(rotated.api_key().len(), 64);

        // The retired key stops authenticating immediately
        let result = service.authenticate(&old_key).await;
        assert!(matches!(result, Err(DomainError::InvalidCredential)));
        assert!(service.authenticate(rotated.api_key()).await.is_ok());
    }

    #[tokio::test]
    async fn test_rotate_key_without_subscription() {
        let service = default_service();

        let result = service.rotate_key(AccountId::new()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_quota_scenario() {
        // Plan quota 3: three calls pass, the fourth suspends, the fifth
        // fails on the suspended path without incrementing.
        let service = default_service();
        let sub = service.create(AccountId::new(), None).await.unwrap();

        for expected in 1..=3u32 {
            let updated = service.record_usage(sub.id()).await.unwrap();
            assert_eq!(updated.usage_count(), expected);
            assert!(updated.is_active());
        }

        let result = service.record_usage(sub.id()).await;
        assert!(matches!(result, Err(DomainError::QuotaExceeded)));

        let suspended = service.get(sub.id()).await.unwrap().unwrap();
        assert_eq!(suspended.usage_count(), 4);
        assert!(!suspended.is_active());

        let result = service.record_usage(sub.id()).await;
        assert!(matches!(result, Err(DomainError::SubscriptionSuspended)));

        let unchanged = service.get(sub.id()).await.unwrap().unwrap();
        assert_eq!(unchanged.usage_count(), 4);
    }

    #[tokio::test]
    async fn test_suspension_survives_window_reset() {
        // A suspended subscription whose window has since lapsed stays
        // suspended; the lapse never clears it.
        let repo = Arc::new(InMemorySubscriptionRepository::new());
        let plans = Arc::new(InMemoryPlanRepository::with_plans(vec![plan("free", 3, 30)]));
        let service = SubscriptionService::new(Arc::clone(&repo), plans);

        let free = plan("free", 3, 30);
        let mut sub = Subscription::new(AccountId::new(), &free, "suspended-key")
            .with_reset_at(Utc::now() - Duration::days(1));
        sub.set_active(false);
        repo.create(sub.clone()).await.unwrap();

        let result = service.authenticate("suspended-key").await;
        assert!(matches!(result, Err(DomainError::SubscriptionSuspended)));

        let unchanged = service.get(sub.id()).await.unwrap().unwrap();
        assert_eq!(unchanged.usage_count(), 0);
        assert!(!unchanged.is_active());
    }

    #[tokio::test]
    async fn test_explicit_reactivation() {
        let service = default_service();
        let sub = service.create(AccountId::new(), None).await.unwrap();

        for _ in 0..3 {
            service.record_usage(sub.id()).await.unwrap();
        }
        let _ = service.record_usage(sub.id()).await;

        service.set_active(sub.id(), true).await.unwrap();

        let restored = service.get(sub.id()).await.unwrap().unwrap();
        assert!(restored.is_active());
    }

    #[tokio::test]
    async fn test_authenticate_flow() {
        let service = default_service();
        let sub = service.create(AccountId::new(), Some("pro")).await.unwrap();

        let authenticated = service.authenticate(sub.api_key()).await.unwrap();
        assert_eq!(authenticated.id(), sub.id());
        assert_eq!(authenticated.usage_count(), 1);

        let result = service.authenticate("no-such-key").await;
        assert!(matches!(result, Err(DomainError::InvalidCredential)));
    }

    #[tokio::test]
    async fn test_concurrent_record_usage_counts_every_call() {
        let service = Arc::new(default_service());
        let sub = service.create(AccountId::new(), Some("pro")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..48 {
            let service = Arc::clone(&service);
            let id = *sub.id();
            handles.push(tokio::spawn(async move { service.record_usage(&id).await }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let updated = service.get(sub.id()).await.unwrap().unwrap();
        assert_eq!(updated.usage_count(), 48);
        assert!(updated.is_active());
    }

    #[tokio::test]
    async fn test_concurrent_calls_suspend_exactly_at_threshold() {
        // Quota 8, 16 concurrent calls: exactly 8 succeed, the crossing call
        // suspends, the rest fail without pushing the counter past quota + 1.
        let service = Arc::new(service_with_plans(vec![plan("free", 8, 30)]));
        let sub = service.create(AccountId::new(), None).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = Arc::clone(&service);
            let id = *sub.id();
            handles.push(tokio::spawn(async move { service.record_usage(&id).await }));
        }

        let mut recorded = 0u32;
        let mut quota_exceeded = 0u32;
        let mut suspended = 0u32;

        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => recorded += 1,
                Err(DomainError::QuotaExceeded) => quota_exceeded += 1,
                Err(DomainError::SubscriptionSuspended) => suspended += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(recorded, 8);
        assert_eq!(quota_exceeded + suspended, 8);

        let updated = service.get(sub.id()).await.unwrap().unwrap();
        assert!(!updated.is_active());
        // Every recorded call plus each crossing attempt incremented once;
        // suspended-path rejections did not.
        assert_eq!(updated.usage_count(), 8 + quota_exceeded);
    }

    #[tokio::test]
    async fn test_window_reset_through_service() {
        let repo = Arc::new(InMemorySubscriptionRepository::new());
        let plans = Arc::new(InMemoryPlanRepository::with_plans(vec![plan("free", 3, 30)]));
        let service = SubscriptionService::new(Arc::clone(&repo), plans);

        // Seed a subscription whose window lapsed five days ago
        let free = plan("free", 3, 30);
        let sub = Subscription::new(AccountId::new(), &free, "stale-window-key")
            .with_reset_at(Utc::now() - Duration::days(5));
        repo.create(sub.clone()).await.unwrap();

        let before = Utc::now();
        let updated = service.record_usage(sub.id()).await.unwrap();

        assert_eq!(updated.usage_count(), 1);
        assert!(updated.reset_at() >= before + Duration::days(30));
    }

    #[tokio::test]
    async fn test_is_quota_exceeded_and_days_until_reset() {
        let service = default_service();
        let sub = service.create(AccountId::new(), None).await.unwrap();

        assert!(!service.is_quota_exceeded(sub.id()).await.unwrap());

        for _ in 0..3 {
            service.record_usage(sub.id()).await.unwrap();
        }
        assert!(service.is_quota_exceeded(sub.id()).await.unwrap());

        let days = service.days_until_reset(sub.id()).await.unwrap();
        assert_eq!(days, 29);
    }

    #[tokio::test]
    async fn test_exhausted_key_space_persists_nothing() {
        // A single-key generator saturates the key space: the first create
        // succeeds, the second burns all attempts and leaves no subscription.
        let plans = Arc::new(InMemoryPlanRepository::with_plans(vec![plan("free", 3, 30)]));
        let repo = Arc::new(InMemorySubscriptionRepository::new());
        let service = SubscriptionService::new(Arc::clone(&repo), plans)
            .with_key_generator(KeyGenerator::new().with_key_bytes(0));

        service.create(AccountId::new(), None).await.unwrap();

        let result = service.create(AccountId::new(), None).await;
        assert!(matches!(
            result,
            Err(DomainError::KeyGenerationExhausted { attempts: 10 })
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
