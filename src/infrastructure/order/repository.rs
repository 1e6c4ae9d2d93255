//! In-memory order repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::order::{Order, OrderRepository};
use crate::domain::subscription::SubscriptionId;
use crate::domain::tenant::TenantScoped;
use crate::domain::DomainError;

/// In-memory implementation of OrderRepository
#[derive(Debug)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenantScoped<Order> for InMemoryOrderRepository {
    async fn list_for_tenant(&self, tenant: &SubscriptionId) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().await;

        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.subscription_id() == tenant)
            .cloned()
            .collect();
        result.sort_by_key(|o| std::cmp::Reverse(o.created_at()));

        Ok(result)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id().as_uuid(), order.clone());
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_orders_are_tenant_scoped() {
        let repo = InMemoryOrderRepository::new();
        let tenant_a = SubscriptionId::new();
        let tenant_b = SubscriptionId::new();

        repo.create(Order::new(tenant_a)).await.unwrap();
        repo.create(Order::new(tenant_a)).await.unwrap();
        repo.create(Order::new(tenant_b)).await.unwrap();

        assert_eq!(repo.list_for_tenant(&tenant_a).await.unwrap().len(), 2);
        assert_eq!(repo.list_for_tenant(&tenant_b).await.unwrap().len(), 1);
    }
}
