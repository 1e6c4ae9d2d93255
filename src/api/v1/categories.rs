//! Category endpoints (tenant-scoped)

use axum::{extract::State, http::StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::RequireSubscription;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::catalog::Category;
use crate::infrastructure::catalog::CreateCategoryRequest;

/// Category representation with directly nested children
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub children: Vec<CategoryResponse>,
}

/// Assemble the category forest for one tenant from the flat list
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryResponse> {
    build_subtree(categories, None)
}

fn build_subtree(
    categories: &[Category],
    parent: Option<&crate::domain::catalog::CategoryId>,
) -> Vec<CategoryResponse> {
    categories
        .iter()
        .filter(|c| c.parent_id() == parent)
        .map(|c| CategoryResponse {
            id: c.id().to_string(),
            name: c.name().to_string(),
            parent_id: c.parent_id().map(|p| p.to_string()),
            children: build_subtree(categories, Some(c.id())),
        })
        .collect()
}

/// GET /v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    RequireSubscription(subscription): RequireSubscription,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    debug!(tenant = %subscription.id(), "Listing categories");

    let categories = state
        .catalog_service
        .list_categories(subscription.id())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(build_category_tree(&categories)))
}

/// POST /v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireSubscription(subscription): RequireSubscription,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    debug!(tenant = %subscription.id(), name = %request.name, "Creating category");

    let category = state
        .catalog_service
        .create_category(subscription.id(), request)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse {
            id: category.id().to_string(),
            name: category.name().to_string(),
            parent_id: category.parent_id().map(|p| p.to_string()),
            children: Vec::new(),
        }),
    ))
}
