//! Product endpoints (tenant-scoped)

use axum::{extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::RequireSubscription;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::catalog::Product;
use crate::infrastructure::catalog::CreateProductRequest;

/// Product representation with derived pricing fields
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    pub final_price: Decimal,
    pub has_discount: bool,
    pub stock: u32,
    pub is_in_stock: bool,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            category_id: product.category_id().to_string(),
            name: product.name().to_string(),
            slug: product.slug().to_string(),
            description: product.description().map(String::from),
            price: product.price(),
            discount_price: product.discount_price(),
            final_price: product.final_price(),
            has_discount: product.has_discount(),
            stock: product.stock(),
            is_in_stock: product.is_in_stock(),
            is_active: product.is_active(),
            created_at: product.created_at().to_rfc3339(),
            updated_at: product.updated_at().to_rfc3339(),
        }
    }
}

/// GET /v1/products
pub async fn list_products(
    State(state): State<AppState>,
    RequireSubscription(subscription): RequireSubscription,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    debug!(tenant = %subscription.id(), "Listing products");

    let products = state
        .catalog_service
        .list_products(subscription.id())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

/// POST /v1/products
pub async fn create_product(
    State(state): State<AppState>,
    RequireSubscription(subscription): RequireSubscription,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    debug!(tenant = %subscription.id(), name = %request.name, "Creating product");

    let product = state
        .catalog_service
        .create_product(subscription.id(), request)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CategoryId;
    use crate::domain::subscription::SubscriptionId;

    #[test]
    fn test_product_response_derived_fields() {
        let product = Product::new(
            SubscriptionId::new(),
            CategoryId::new(),
            "Mechanical Keyboard",
            "mechanical-keyboard",
            Decimal::new(4999, 2),
        )
        .with_discount_price(Decimal::new(3999, 2))
        .with_stock(3);

        let response = ProductResponse::from(&product);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["slug"], "mechanical-keyboard");
        assert_eq!(json["final_price"], "39.99");
        assert_eq!(json["has_discount"], true);
        assert_eq!(json["is_in_stock"], true);
    }
}
