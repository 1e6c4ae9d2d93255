//! Plan registry trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Plan;
use crate::domain::DomainError;

/// Registry trait for subscription plans
///
/// Read-mostly: plans are registered at startup and resolved by slug when
/// subscriptions are created or metered.
#[async_trait]
pub trait PlanRepository: Send + Sync + Debug {
    /// Resolve a plan by its slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Plan>, DomainError>;

    /// List all registered plans, cheapest quota first
    async fn list(&self) -> Result<Vec<Plan>, DomainError>;

    /// Register a plan, replacing any existing plan with the same slug
    async fn upsert(&self, plan: Plan) -> Result<Plan, DomainError>;

    /// Check if a plan slug is registered
    async fn exists(&self, slug: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_slug(slug).await?.is_some())
    }
}
