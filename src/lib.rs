//! Storefront API
//!
//! A multi-tenant catalog and order backend with:
//! - API-key authentication and per-subscription quota metering
//! - Periodic usage-window reset with sticky quota suspension
//! - Tenant-scoped catalog (categories, products) and orders
//! - JWT-authenticated account and subscription management

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::warn;

use api::state::AppState;
use domain::plan::{Plan, PlanSlug};
use infrastructure::account::{AccountService, Argon2Hasher, InMemoryAccountRepository};
use infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};
use infrastructure::catalog::{
    CatalogService, InMemoryCategoryRepository, InMemoryProductRepository,
};
use infrastructure::key::KeyGenerator;
use infrastructure::order::{InMemoryOrderRepository, OrderService};
use infrastructure::plan::InMemoryPlanRepository;
use infrastructure::subscription::{InMemorySubscriptionRepository, SubscriptionService};

/// Create the application state with all services initialized
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let plan_repository = Arc::new(InMemoryPlanRepository::with_plans(default_plans()));
    let subscription_repository = Arc::new(InMemorySubscriptionRepository::new());

    let subscription_service: Arc<dyn api::state::SubscriptionServiceTrait> = Arc::new(
        SubscriptionService::new(subscription_repository, plan_repository)
            .with_key_generator(KeyGenerator::new()),
    );

    let account_repository = Arc::new(InMemoryAccountRepository::new());
    let password_hasher = Arc::new(Argon2Hasher::new());
    let account_service: Arc<dyn api::state::AccountServiceTrait> =
        Arc::new(AccountService::new(account_repository, password_hasher));

    let jwt_service = create_jwt_service(config);

    let catalog_service: Arc<dyn api::state::CatalogServiceTrait> = Arc::new(CatalogService::new(
        Arc::new(InMemoryCategoryRepository::new()),
        Arc::new(InMemoryProductRepository::new()),
    ));

    let order_service: Arc<dyn api::state::OrderServiceTrait> =
        Arc::new(OrderService::new(Arc::new(InMemoryOrderRepository::new())));

    Ok(AppState::new(
        subscription_service,
        account_service,
        jwt_service,
        catalog_service,
        order_service,
    ))
}

/// Create the JWT service from config, environment, or a random secret
fn create_jwt_service(config: &AppConfig) -> Arc<dyn JwtGenerator> {
    let jwt_expiration = u64::from(config.auth.jwt_expiration_hours);

    let jwt_secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            warn!(
                "No JWT secret configured. Generating a random one; \
                sessions will NOT survive restarts. Set JWT_SECRET for \
                persistent sessions."
            );
            generate_random_secret()
        });

    Arc::new(JwtService::new(JwtConfig::new(jwt_secret, jwt_expiration)))
}

/// Generate a random JWT secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

// ============================================================================
// Default Entities
// ============================================================================

fn default_plans() -> Vec<Plan> {
    vec![
        Plan::new(PlanSlug::new("free").unwrap(), "Free", 1_000, 30)
            .unwrap()
            .with_description("Evaluation tier for small storefronts"),
        Plan::new(PlanSlug::new("pro").unwrap(), "Pro", 50_000, 30)
            .unwrap()
            .with_description("Production tier for growing storefronts"),
        Plan::new(PlanSlug::new("enterprise").unwrap(), "Enterprise", 1_000_000, 30)
            .unwrap()
            .with_description("High-volume tier with a dedicated quota"),
    ]
}
