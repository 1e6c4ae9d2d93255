//! In-memory catalog repository implementations

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::catalog::{
    Category, CategoryId, CategoryRepository, Product, ProductRepository,
};
use crate::domain::subscription::SubscriptionId;
use crate::domain::tenant::TenantScoped;
use crate::domain::DomainError;

/// In-memory implementation of CategoryRepository
#[derive(Debug)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenantScoped<Category> for InMemoryCategoryRepository {
    async fn list_for_tenant(
        &self,
        tenant: &SubscriptionId,
    ) -> Result<Vec<Category>, DomainError> {
        let categories = self.categories.read().await;

        let mut result: Vec<Category> = categories
            .values()
            .filter(|c| c.subscription_id() == tenant)
            .cloned()
            .collect();
        result.sort_by_key(|c| std::cmp::Reverse(c.created_at()));

        Ok(result)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn get(
        &self,
        tenant: &SubscriptionId,
        id: &CategoryId,
    ) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().await;

        Ok(categories
            .get(&id.as_uuid())
            .filter(|c| c.subscription_id() == tenant)
            .cloned())
    }

    async fn create(&self, category: Category) -> Result<Category, DomainError> {
        let mut categories = self.categories.write().await;

        let duplicate = categories.values().any(|c| {
            c.subscription_id() == category.subscription_id()
                && c.parent_id() == category.parent_id()
                && c.name() == category.name()
        });

        if duplicate {
            return Err(DomainError::conflict(format!(
                "Category '{}' already exists under this parent",
                category.name()
            )));
        }

        categories.insert(category.id().as_uuid(), category.clone());

        Ok(category)
    }
}

/// In-memory implementation of ProductRepository
#[derive(Debug)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    /// Index for (tenant, slug) -> product ID lookup
    slug_index: Arc<RwLock<HashMap<(Uuid, String), Uuid>>>,
}

impl InMemoryProductRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            slug_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenantScoped<Product> for InMemoryProductRepository {
    async fn list_for_tenant(
        &self,
        tenant: &SubscriptionId,
    ) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| p.subscription_id() == tenant)
            .cloned()
            .collect();
        result.sort_by_key(|p| std::cmp::Reverse(p.created_at()));

        Ok(result)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        let mut products = self.products.write().await;
        let mut slug_index = self.slug_index.write().await;

        let slug_key = (
            product.subscription_id().as_uuid(),
            product.slug().to_string(),
        );

        if slug_index.contains_key(&slug_key) {
            return Err(DomainError::conflict(format!(
                "Product slug '{}' already exists",
                product.slug()
            )));
        }

        products.insert(product.id().as_uuid(), product.clone());
        slug_index.insert(slug_key, product.id().as_uuid());

        Ok(product)
    }

    async fn slug_exists(
        &self,
        tenant: &SubscriptionId,
        slug: &str,
    ) -> Result<bool, DomainError> {
        let slug_index = self.slug_index.read().await;
        Ok(slug_index.contains_key(&(tenant.as_uuid(), slug.to_string())))
    }
}
