//! Catalog entities - categories and products, always tenant-scoped

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::subscription::SubscriptionId;

/// Category identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product category, arranged as an adjacency-list tree per tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    /// Owning tenant
    subscription_id: SubscriptionId,
    name: String,
    /// Parent category; `None` for roots
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<CategoryId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(
        subscription_id: SubscriptionId,
        name: impl Into<String>,
        parent_id: Option<CategoryId>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: CategoryId::new(),
            subscription_id,
            name: name.into(),
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn subscription_id(&self) -> &SubscriptionId {
        &self.subscription_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<&CategoryId> {
        self.parent_id.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Product in a tenant's catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    /// Owning tenant
    subscription_id: SubscriptionId,
    category_id: CategoryId,
    name: String,
    /// URL-friendly identifier, unique per tenant; generated, never supplied
    slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// Regular price
    price: Decimal,
    /// Discounted price, if applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_price: Option<Decimal>,
    /// Current stock quantity
    stock: u32,
    /// Whether the product is available for purchase
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        subscription_id: SubscriptionId,
        category_id: CategoryId,
        name: impl Into<String>,
        slug: impl Into<String>,
        price: Decimal,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: ProductId::new(),
            subscription_id,
            category_id,
            name: name.into(),
            slug: slug.into(),
            description: None,
            price,
            discount_price: None,
            stock: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set discounted price
    pub fn with_discount_price(mut self, discount_price: Decimal) -> Self {
        self.discount_price = Some(discount_price);
        self
    }

    /// Set initial stock
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Set availability
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    // Getters

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn subscription_id(&self) -> &SubscriptionId {
        &self.subscription_id
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn discount_price(&self) -> Option<Decimal> {
        self.discount_price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Derived attributes

    /// The price a buyer pays: the discount when one is set and positive
    pub fn final_price(&self) -> Decimal {
        match self.discount_price {
            Some(discount) if discount > Decimal::ZERO => discount,
            _ => self.price,
        }
    }

    /// Whether a discount below the regular price is set
    pub fn has_discount(&self) -> bool {
        matches!(self.discount_price, Some(discount) if discount < self.price)
    }

    /// Whether any stock remains
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Draw down stock; rejects draws larger than what remains
    pub fn reduce_stock(&mut self, quantity: u32) -> Result<(), StockError> {
        if quantity > self.stock {
            return Err(StockError::InsufficientStock {
                available: self.stock,
                requested: quantity,
            });
        }
        self.stock -= quantity;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Error raised when drawing down product stock
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum StockError {
    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: u32, requested: u32 },
}
