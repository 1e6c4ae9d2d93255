//! Order endpoints (tenant-scoped)

use axum::{extract::State, http::StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::RequireSubscription;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::order::Order;

/// Order representation
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub order_number: String,
    pub created_at: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            order_number: order.order_number().to_string(),
            created_at: order.created_at().to_rfc3339(),
        }
    }
}

/// GET /v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
    RequireSubscription(subscription): RequireSubscription,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    debug!(tenant = %subscription.id(), "Listing orders");

    let orders = state
        .order_service
        .list_orders(subscription.id())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}

/// POST /v1/orders
pub async fn create_order(
    State(state): State<AppState>,
    RequireSubscription(subscription): RequireSubscription,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    debug!(tenant = %subscription.id(), "Creating order");

    let order = state
        .order_service
        .create_order(subscription.id())
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(&order))))
}
