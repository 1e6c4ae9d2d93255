//! Tenant-facing v1 API

pub mod categories;
pub mod orders;
pub mod products;
pub mod subscriptions;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        // Subscription management (session-authenticated)
        .route("/subscriptions", post(subscriptions::create_subscription))
        .route(
            "/subscriptions/regenerate-key",
            post(subscriptions::regenerate_key),
        )
        // Tenant-scoped resources (API-key gated, metered)
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
}
