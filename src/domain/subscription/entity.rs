//! Subscription entity and the usage accounting transition

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::AccountId;
use crate::domain::plan::{Plan, PlanSlug};

/// Subscription identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Generate a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of applying one metered request to a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageOutcome {
    /// The request was recorded and the subscription stays active
    Recorded,
    /// This request pushed the subscription over its quota; it is now
    /// suspended (the crossing increment is still recorded)
    QuotaExceeded,
}

/// A tenant's subscription
///
/// One subscription per account. Carries the API key the tenant
/// authenticates with and the usage counter metered against the plan quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier
    id: SubscriptionId,
    /// Owning account (1:1)
    account_id: AccountId,
    /// Slug of the plan this subscription is metered against
    plan_slug: PlanSlug,
    /// API key, unique across all subscriptions; system-generated only
    api_key: String,
    /// Whether the subscription may authenticate requests
    is_active: bool,
    /// Metered calls in the current usage window
    usage_count: u32,
    /// When the current usage window ends
    reset_at: DateTime<Utc>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Create a new active subscription with an empty usage window
    ///
    /// The window end is computed here, before the first persist; a
    /// subscription never exists without one.
    pub fn new(account_id: AccountId, plan: &Plan, api_key: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: SubscriptionId::new(),
            account_id,
            plan_slug: plan.slug().clone(),
            api_key: api_key.into(),
            is_active: true,
            usage_count: 0,
            reset_at: now + Duration::days(i64::from(plan.period_days())),
            created_at: now,
            updated_at: now,
        }
    }

    /// Override the window end (used to seed fixtures mid-window)
    pub fn with_reset_at(mut self, reset_at: DateTime<Utc>) -> Self {
        self.reset_at = reset_at;
        self
    }

    // Getters

    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn plan_slug(&self) -> &PlanSlug {
        &self.plan_slug
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    pub fn reset_at(&self) -> DateTime<Utc> {
        self.reset_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Accounting

    /// Apply one metered request
    ///
    /// If the usage window has lapsed the counter is reset and the window is
    /// re-anchored at `now + period` (not at the stale end; window drift is
    /// accepted). The counter is then incremented; crossing the plan quota
    /// suspends the subscription. All field changes from one call must be
    /// persisted together - callers run this inside the repository's
    /// per-subscription critical section.
    pub fn record_usage(&mut self, plan: &Plan, now: DateTime<Utc>) -> UsageOutcome {
        if now > self.reset_at {
            self.usage_count = 0;
            self.reset_at = now + Duration::days(i64::from(plan.period_days()));
        }

        self.usage_count = self.usage_count.saturating_add(1);
        self.updated_at = now;

        if self.usage_count > plan.api_quota() {
            self.is_active = false;
            UsageOutcome::QuotaExceeded
        } else {
            UsageOutcome::Recorded
        }
    }

    /// Check whether the subscription has used up its quota
    ///
    /// Diagnostic read; enforcement happens inside [`Self::record_usage`].
    pub fn is_quota_exceeded(&self, plan: &Plan) -> bool {
        self.usage_count >= plan.api_quota()
    }

    /// Whole days until the usage window resets; 0 once it has lapsed
    pub fn days_until_reset(&self, now: DateTime<Utc>) -> i64 {
        if now > self.reset_at {
            return 0;
        }
        (self.reset_at - now).num_days()
    }

    // Mutators

    /// Replace the API key (rotation)
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
        self.touch();
    }

    /// Set the active flag
    ///
    /// Suspension is never lifted automatically; reactivation goes through
    /// this explicit status change.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::PlanSlug;

    fn test_plan(quota: u32, period_days: u32) -> Plan {
        Plan::new(PlanSlug::new("free").unwrap(), "Free", quota, period_days).unwrap()
    }

    fn test_subscription(plan: &Plan) -> Subscription {
        Subscription::new(AccountId::new(), plan, "test-api-key")
    }

    #[test]
    fn test_new_subscription_defaults() {
        let plan = test_plan(3, 30);
        let sub = test_subscription(&plan);

        assert!(sub.is_active());
        assert_eq!(sub.usage_count(), 0);
        assert!(sub.reset_at() > Utc::now());
        assert_eq!(sub.plan_slug().as_str(), "free");
    }

    #[test]
    fn test_record_usage_increments() {
        let plan = test_plan(3, 30);
        let mut sub = test_subscription(&plan);

        assert_eq!(sub.record_usage(&plan, Utc::now()), UsageOutcome::Recorded);
        assert_eq!(sub.usage_count(), 1);
        assert!(sub.is_active());
    }

    #[test]
    fn test_quota_crossing_suspends_and_counts() {
        let plan = test_plan(3, 30);
        let mut sub = test_subscription(&plan);

        for _ in 0..3 {
            assert_eq!(sub.record_usage(&plan, Utc::now()), UsageOutcome::Recorded);
        }
        assert_eq!(sub.usage_count(), 3);
        assert!(sub.is_active());

        // The crossing call is recorded and flips the subscription inactive
        assert_eq!(
            sub.record_usage(&plan, Utc::now()),
            UsageOutcome::QuotaExceeded
        );
        assert_eq!(sub.usage_count(), 4);
        assert!(!sub.is_active());
    }

    #[test]
    fn test_window_reset_anchors_on_now() {
        let plan = test_plan(10, 30);
        let now = Utc::now();
        let stale_reset = now - Duration::days(5);
        let mut sub = test_subscription(&plan).with_reset_at(stale_reset);

        assert_eq!(sub.record_usage(&plan, now), UsageOutcome::Recorded);

        // Counter restarted before the increment
        assert_eq!(sub.usage_count(), 1);
        // New window is anchored at `now`, not chained from the stale end
        assert_eq!(sub.reset_at(), now + Duration::days(30));
    }

    #[test]
    fn test_window_reset_clears_accumulated_usage() {
        let plan = test_plan(3, 30);
        let now = Utc::now();
        let mut sub = test_subscription(&plan);

        sub.record_usage(&plan, now);
        sub.record_usage(&plan, now);
        assert_eq!(sub.usage_count(), 2);

        let after_window = sub.reset_at() + Duration::seconds(1);
        assert_eq!(sub.record_usage(&plan, after_window), UsageOutcome::Recorded);
        assert_eq!(sub.usage_count(), 1);
    }

    #[test]
    fn test_is_quota_exceeded_uses_at_least_semantics() {
        let plan = test_plan(2, 30);
        let mut sub = test_subscription(&plan);

        assert!(!sub.is_quota_exceeded(&plan));

        sub.record_usage(&plan, Utc::now());
        sub.record_usage(&plan, Utc::now());

        // At exactly the quota the diagnostic reads exceeded, while the
        // subscription itself is still active
        assert_eq!(sub.usage_count(), 2);
        assert!(sub.is_quota_exceeded(&plan));
        assert!(sub.is_active());
    }

    #[test]
    fn test_days_until_reset() {
        let plan = test_plan(3, 30);
        let now = Utc::now();

        let sub = test_subscription(&plan).with_reset_at(now + Duration::days(10) + Duration::hours(1));
        assert_eq!(sub.days_until_reset(now), 10);

        let lapsed = test_subscription(&plan).with_reset_at(now - Duration::hours(1));
        assert_eq!(lapsed.days_until_reset(now), 0);
    }

    #[test]
    fn test_set_api_key_touches_updated_at() {
        let plan = test_plan(3, 30);
        let mut sub = test_subscription(&plan);
        let before = sub.updated_at();

        sub.set_api_key("rotated-key");

        assert_eq!(sub.api_key(), "rotated-key");
        assert!(sub.updated_at() >= before);
    }

    #[test]
    fn test_set_active() {
        let plan = test_plan(3, 30);
        let mut sub = test_subscription(&plan);

        sub.set_active(false);
        assert!(!sub.is_active());

        sub.set_active(true);
        assert!(sub.is_active());
    }
}
