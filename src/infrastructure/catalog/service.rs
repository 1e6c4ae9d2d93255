//! Catalog service - tenant-scoped category and product management

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::domain::catalog::{
    Category, CategoryId, CategoryRepository, Product, ProductRepository,
};
use crate::domain::subscription::SubscriptionId;
use crate::domain::DomainError;

use super::slug::{collision_suffix, slugify};

/// Attempts to find a free slug variant before giving up
const MAX_SLUG_ATTEMPTS: u32 = 10;

/// Request for creating a category
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<uuid::Uuid>,
}

/// Request for creating a product
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub category_id: uuid::Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub discount_price: Option<Decimal>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Catalog service
#[derive(Debug)]
pub struct CatalogService<C, P>
where
    C: CategoryRepository,
    P: ProductRepository,
{
    categories: Arc<C>,
    products: Arc<P>,
}

impl<C: CategoryRepository, P: ProductRepository> CatalogService<C, P> {
    /// Create a new catalog service
    pub fn new(categories: Arc<C>, products: Arc<P>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// List the tenant's categories
    pub async fn list_categories(
        &self,
        tenant: &SubscriptionId,
    ) -> Result<Vec<Category>, DomainError> {
        self.categories.list_for_tenant(tenant).await
    }

    /// Create a category for the tenant
    pub async fn create_category(
        &self,
        tenant: &SubscriptionId,
        request: CreateCategoryRequest,
    ) -> Result<Category, DomainError> {
        if request.name.trim().is_empty() {
            return Err(DomainError::validation("Category name cannot be empty"));
        }

        let parent_id = match request.parent_id {
            Some(id) => {
                let parent_id = CategoryId::from_uuid(id);
                self.categories
                    .get(tenant, &parent_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::validation(format!("Parent category '{}' not found", id))
                    })?;
                Some(parent_id)
            }
            None => None,
        };

        let category = Category::new(*tenant, request.name.trim(), parent_id);
        self.categories.create(category).await
    }

    /// List the tenant's products
    pub async fn list_products(
        &self,
        tenant: &SubscriptionId,
    ) -> Result<Vec<Product>, DomainError> {
        self.products.list_for_tenant(tenant).await
    }

    /// Create a product for the tenant
    ///
    /// The slug is derived from the product name; collisions within the
    /// tenant get a short random suffix.
    pub async fn create_product(
        &self,
        tenant: &SubscriptionId,
        request: CreateProductRequest,
    ) -> Result<Product, DomainError> {
        if request.name.trim().is_empty() {
            return Err(DomainError::validation("Product name cannot be empty"));
        }

        if request.price <= Decimal::ZERO {
            return Err(DomainError::validation("Price must be greater than zero"));
        }

        if let Some(discount) = request.discount_price {
            if discount <= Decimal::ZERO {
                return Err(DomainError::validation(
                    "Discount price must be greater than zero",
                ));
            }
        }

        let category_id = CategoryId::from_uuid(request.category_id);
        self.categories
            .get(tenant, &category_id)
            .await?
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Category '{}' not found",
                    request.category_id
                ))
            })?;

        let slug = self.allocate_slug(tenant, request.name.trim()).await?;

        let mut product = Product::new(*tenant, category_id, request.name.trim(), slug, request.price)
            .with_stock(request.stock)
            .with_active(request.is_active);

        if let Some(description) = request.description {
            product = product.with_description(description);
        }
        if let Some(discount) = request.discount_price {
            product = product.with_discount_price(discount);
        }

        let created = self.products.create(product).await?;

        info!(
            product_id = %created.id(),
            slug = created.slug(),
            "Product created"
        );

        Ok(created)
    }

    async fn allocate_slug(
        &self,
        tenant: &SubscriptionId,
        name: &str,
    ) -> Result<String, DomainError> {
        let base = slugify(name);

        if base.is_empty() {
            return Err(DomainError::validation(
                "Product name does not yield a usable slug",
            ));
        }

        if !self.products.slug_exists(tenant, &base).await? {
            return Ok(base);
        }

        for _ in 0..MAX_SLUG_ATTEMPTS {
            let candidate = format!("{}-{}", base, collision_suffix());

            if !self.products.slug_exists(tenant, &candidate).await? {
                return Ok(candidate);
            }
        }

        Err(DomainError::internal(format!(
            "Failed to find a free slug variant for '{}'",
            base
        )))
    }
}
