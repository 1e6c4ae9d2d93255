//! In-memory plan registry implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::plan::{Plan, PlanRepository};
use crate::domain::DomainError;

/// In-memory implementation of PlanRepository
#[derive(Debug)]
pub struct InMemoryPlanRepository {
    plans: Arc<RwLock<HashMap<String, Plan>>>,
}

impl InMemoryPlanRepository {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            plans: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry seeded with the given plans
    pub fn with_plans(plans: Vec<Plan>) -> Self {
        let plans_map: HashMap<String, Plan> = plans
            .into_iter()
            .map(|p| (p.slug().as_str().to_string(), p))
            .collect();

        Self {
            plans: Arc::new(RwLock::new(plans_map)),
        }
    }
}

impl Default for InMemoryPlanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Plan>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans.get(slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Plan>, DomainError> {
        let plans = self.plans.read().await;

        let mut result: Vec<Plan> = plans.values().cloned().collect();
        result.sort_by_key(|p| p.api_quota());

        Ok(result)
    }

    async fn upsert(&self, plan: Plan) -> Result<Plan, DomainError> {
        let mut plans = self.plans.write().await;
        plans.insert(plan.slug().as_str().to_string(), plan.clone());
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::PlanSlug;

    fn test_plan(slug: &str, quota: u32) -> Plan {
        Plan::new(PlanSlug::new(slug).unwrap(), slug.to_uppercase(), quota, 30).unwrap()
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let repo = InMemoryPlanRepository::with_plans(vec![test_plan("free", 1_000)]);

        let plan = repo.get_by_slug("free").await.unwrap();
        assert!(plan.is_some());
        assert_eq!(plan.unwrap().api_quota(), 1_000);

        assert!(repo.get_by_slug("gold").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_quota() {
        let repo = InMemoryPlanRepository::with_plans(vec![
            test_plan("pro", 50_000),
            test_plan("free", 1_000),
        ]);

        let plans = repo.list().await.unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].slug().as_str(), "free");
        assert_eq!(plans[1].slug().as_str(), "pro");
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let repo = InMemoryPlanRepository::new();

        repo.upsert(test_plan("free", 1_000)).await.unwrap();
        repo.upsert(test_plan("free", 2_000)).await.unwrap();

        let plan = repo.get_by_slug("free").await.unwrap().unwrap();
        assert_eq!(plan.api_quota(), 2_000);

        assert!(repo.exists("free").await.unwrap());
    }
}
