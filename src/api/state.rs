//! Application state for shared services

use std::sync::Arc;

use crate::domain::account::{Account, AccountId, AccountRepository};
use crate::domain::catalog::{Category, CategoryRepository, Product, ProductRepository};
use crate::domain::order::{Order, OrderRepository};
use crate::domain::plan::{Plan, PlanRepository};
use crate::domain::subscription::{Subscription, SubscriptionId, SubscriptionRepository};
use crate::domain::DomainError;
use crate::infrastructure::account::{AccountService, PasswordHasher, RegisterAccountRequest};
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::catalog::{
    CatalogService, CreateCategoryRequest, CreateProductRequest,
};
use crate::infrastructure::order::OrderService;
use crate::infrastructure::subscription::SubscriptionService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub subscription_service: Arc<dyn SubscriptionServiceTrait>,
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub catalog_service: Arc<dyn CatalogServiceTrait>,
    pub order_service: Arc<dyn OrderServiceTrait>,
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        subscription_service: Arc<dyn SubscriptionServiceTrait>,
        account_service: Arc<dyn AccountServiceTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
        catalog_service: Arc<dyn CatalogServiceTrait>,
        order_service: Arc<dyn OrderServiceTrait>,
    ) -> Self {
        Self {
            subscription_service,
            account_service,
            jwt_service,
            catalog_service,
            order_service,
        }
    }
}

/// Trait for subscription lifecycle operations
#[async_trait::async_trait]
pub trait SubscriptionServiceTrait: Send + Sync {
    /// Create a subscription for an account
    async fn create(
        &self,
        account_id: AccountId,
        plan_slug: Option<&str>,
    ) -> Result<Subscription, DomainError>;
    /// Rotate the API key of an account's subscription
    async fn rotate_key(&self, account_id: AccountId) -> Result<Subscription, DomainError>;
    /// Resolve an API key and meter the request
    async fn authenticate(&self, api_key: &str) -> Result<Subscription, DomainError>;
    /// Get a subscription by ID
    async fn get(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;
    /// Resolve the plan a subscription is metered against
    async fn plan_of(&self, subscription: &Subscription) -> Result<Plan, DomainError>;
    /// List registered plans
    async fn list_plans(&self) -> Result<Vec<Plan>, DomainError>;
    /// Deliberate suspension or reactivation
    async fn set_active(
        &self,
        id: &SubscriptionId,
        active: bool,
    ) -> Result<Subscription, DomainError>;
}

/// Trait for account operations
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError>;
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, DomainError>;
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for catalog operations
#[async_trait::async_trait]
pub trait CatalogServiceTrait: Send + Sync {
    async fn list_categories(
        &self,
        tenant: &SubscriptionId,
    ) -> Result<Vec<Category>, DomainError>;
    async fn create_category(
        &self,
        tenant: &SubscriptionId,
        request: CreateCategoryRequest,
    ) -> Result<Category, DomainError>;
    async fn list_products(&self, tenant: &SubscriptionId) -> Result<Vec<Product>, DomainError>;
    async fn create_product(
        &self,
        tenant: &SubscriptionId,
        request: CreateProductRequest,
    ) -> Result<Product, DomainError>;
}

/// Trait for order operations
#[async_trait::async_trait]
pub trait OrderServiceTrait: Send + Sync {
    async fn list_orders(&self, tenant: &SubscriptionId) -> Result<Vec<Order>, DomainError>;
    async fn create_order(&self, tenant: &SubscriptionId) -> Result<Order, DomainError>;
}

// Implement the state traits for the concrete services

#[async_trait::async_trait]
impl<R, P> SubscriptionServiceTrait for SubscriptionService<R, P>
where
    R: SubscriptionRepository + 'static,
    P: PlanRepository + 'static,
{
    async fn create(
        &self,
        account_id: AccountId,
        plan_slug: Option<&str>,
    ) -> Result<Subscription, DomainError> {
        SubscriptionService::create(self, account_id, plan_slug).await
    }

    async fn rotate_key(&self, account_id: AccountId) -> Result<Subscription, DomainError> {
        SubscriptionService::rotate_key(self, account_id).await
    }

    async fn authenticate(&self, api_key: &str) -> Result<Subscription, DomainError> {
        SubscriptionService::authenticate(self, api_key).await
    }

    async fn get(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        SubscriptionService::get(self, id).await
    }

    async fn plan_of(&self, subscription: &Subscription) -> Result<Plan, DomainError> {
        SubscriptionService::plan_of(self, subscription).await
    }

    async fn list_plans(&self) -> Result<Vec<Plan>, DomainError> {
        SubscriptionService::list_plans(self).await
    }

    async fn set_active(
        &self,
        id: &SubscriptionId,
        active: bool,
    ) -> Result<Subscription, DomainError> {
        SubscriptionService::set_active(self, id, active).await
    }
}

#[async_trait::async_trait]
impl<R, H> AccountServiceTrait for AccountService<R, H>
where
    R: AccountRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError> {
        AccountService::register(self, request).await
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, DomainError> {
        AccountService::authenticate(self, email, password).await
    }

    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        AccountService::get(self, id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        AccountService::count(self).await
    }
}

#[async_trait::async_trait]
impl<C, P> CatalogServiceTrait for CatalogService<C, P>
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
{
    async fn list_categories(
        &self,
        tenant: &SubscriptionId,
    ) -> Result<Vec<Category>, DomainError> {
        CatalogService::list_categories(self, tenant).await
    }

    async fn create_category(
        &self,
        tenant: &SubscriptionId,
        request: CreateCategoryRequest,
    ) -> Result<Category, DomainError> {
        CatalogService::create_category(self, tenant, request).await
    }

    async fn list_products(&self, tenant: &SubscriptionId) -> Result<Vec<Product>, DomainError> {
        CatalogService::list_products(self, tenant).await
    }

    async fn create_product(
        &self,
        tenant: &SubscriptionId,
        request: CreateProductRequest,
    ) -> Result<Product, DomainError> {
        CatalogService::create_product(self, tenant, request).await
    }
}

#[async_trait::async_trait]
impl<R> OrderServiceTrait for OrderService<R>
where
    R: OrderRepository + 'static,
{
    async fn list_orders(&self, tenant: &SubscriptionId) -> Result<Vec<Order>, DomainError> {
        OrderService::list_orders(self, tenant).await
    }

    async fn create_order(&self, tenant: &SubscriptionId) -> Result<Order, DomainError> {
        OrderService::create_order(self, tenant).await
    }
}
