//! Order repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Order;
use crate::domain::tenant::TenantScoped;
use crate::domain::DomainError;

/// Repository trait for order storage
#[async_trait]
pub trait OrderRepository: TenantScoped<Order> + Send + Sync + Debug {
    /// Persist a new order
    async fn create(&self, order: Order) -> Result<Order, DomainError>;
}
