//! Catalog repository traits

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Category, CategoryId, Product};
use crate::domain::subscription::SubscriptionId;
use crate::domain::tenant::TenantScoped;
use crate::domain::DomainError;

/// Repository trait for category storage
#[async_trait]
pub trait CategoryRepository: TenantScoped<Category> + Send + Sync + Debug {
    /// Get a category by ID, scoped to the owning tenant
    async fn get(
        &self,
        tenant: &SubscriptionId,
        id: &CategoryId,
    ) -> Result<Option<Category>, DomainError>;

    /// Persist a new category
    ///
    /// Fails with `Conflict` when the tenant already has a category with the
    /// same name under the same parent.
    async fn create(&self, category: Category) -> Result<Category, DomainError>;
}

/// Repository trait for product storage
#[async_trait]
pub trait ProductRepository: TenantScoped<Product> + Send + Sync + Debug {
    /// Persist a new product; fails with `Conflict` on a duplicate slug
    /// within the tenant
    async fn create(&self, product: Product) -> Result<Product, DomainError>;

    /// Check whether a slug is already taken within the tenant
    async fn slug_exists(
        &self,
        tenant: &SubscriptionId,
        slug: &str,
    ) -> Result<bool, DomainError>;
}
