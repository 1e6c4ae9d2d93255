//! Order service - tenant-scoped order management

use std::sync::Arc;

use tracing::info;

use crate::domain::order::{Order, OrderRepository};
use crate::domain::subscription::SubscriptionId;
use crate::domain::DomainError;

/// Order service
#[derive(Debug)]
pub struct OrderService<R: OrderRepository> {
    orders: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    /// Create a new order service
    pub fn new(orders: Arc<R>) -> Self {
        Self { orders }
    }

    /// List the tenant's orders
    pub async fn list_orders(&self, tenant: &SubscriptionId) -> Result<Vec<Order>, DomainError> {
        self.orders.list_for_tenant(tenant).await
    }

    /// Create an order for the tenant
    pub async fn create_order(&self, tenant: &SubscriptionId) -> Result<Order, DomainError> {
        let order = Order::new(*tenant);
        let created = self.orders.create(order).await?;

        info!(
            order_id = %created.id(),
            order_number = created.order_number(),
            "Order created"
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::order::InMemoryOrderRepository;

    #[tokio::test]
    async fn test_create_and_list() {
        let service = OrderService::new(Arc::new(InMemoryOrderRepository::new()));
        let tenant = SubscriptionId::new();

        let order = service.create_order(&tenant).await.unwrap();
        assert_eq!(order.order_number().len(), 26);

        let orders = service.list_orders(&tenant).await.unwrap();
        assert_eq!(orders.len(), 1);

        assert!(service
            .list_orders(&SubscriptionId::new())
            .await
            .unwrap()
            .is_empty());
    }
}
