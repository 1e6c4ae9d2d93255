//! Subscription management endpoints

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAccount;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::plan::Plan;
use crate::domain::subscription::Subscription;

/// Request to create a subscription
#[derive(Debug, Default, Deserialize)]
pub struct CreateSubscriptionRequest {
    /// Plan slug; the default tier is assigned when omitted
    #[serde(default)]
    pub plan: Option<String>,
}

/// Plan representation nested in subscription responses
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub slug: String,
    pub name: String,
    pub api_quota: u32,
    pub period_days: u32,
}

impl From<&Plan> for PlanResponse {
    fn from(plan: &Plan) -> Self {
        Self {
            slug: plan.slug().as_str().to_string(),
            name: plan.name().to_string(),
            api_quota: plan.api_quota(),
            period_days: plan.period_days(),
        }
    }
}

/// Subscription representation
///
/// The API key is read-only from the client's perspective: it is only ever
/// system-generated and handed out here.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub plan: PlanResponse,
    pub api_key: String,
    pub is_active: bool,
    pub usage_count: u32,
    pub reset_at: String,
}

impl SubscriptionResponse {
    pub fn from_parts(subscription: &Subscription, plan: &Plan) -> Self {
        Self {
            id: subscription.id().to_string(),
            plan: PlanResponse::from(plan),
            api_key: subscription.api_key().to_string(),
            is_active: subscription.is_active(),
            usage_count: subscription.usage_count(),
            reset_at: subscription.reset_at().to_rfc3339(),
        }
    }
}

/// Create a subscription for the authenticated account
///
/// POST /v1/subscriptions
pub async fn create_subscription(
    State(state): State<AppState>,
    RequireAccount(account): RequireAccount,
    Json(request): Json<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    debug!(account_id = %account.id(), plan = ?request.plan, "Creating subscription");

    let subscription = state
        .subscription_service
        .create(*account.id(), request.plan.as_deref())
        .await
        .map_err(ApiError::from)?;

    let plan = state
        .subscription_service
        .plan_of(&subscription)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::from_parts(&subscription, &plan)),
    ))
}

/// Replace the API key of the authenticated account's subscription
///
/// POST /v1/subscriptions/regenerate-key
pub async fn regenerate_key(
    State(state): State<AppState>,
    RequireAccount(account): RequireAccount,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    debug!(account_id = %account.id(), "Regenerating API key");

    let subscription = state
        .subscription_service
        .rotate_key(*account.id())
        .await
        .map_err(ApiError::from)?;

    let plan = state
        .subscription_service
        .plan_of(&subscription)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(SubscriptionResponse::from_parts(&subscription, &plan)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountId;
    use crate::domain::plan::PlanSlug;

    #[test]
    fn test_subscription_response_shape() {
        let plan = Plan::new(PlanSlug::new("free").unwrap(), "Free", 1_000, 30).unwrap();
        let subscription = Subscription::new(AccountId::new(), &plan, "the-api-key");

        let response = SubscriptionResponse::from_parts(&subscription, &plan);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["plan"]["slug"], "free");
        assert_eq!(json["plan"]["api_quota"], 1_000);
        assert_eq!(json["api_key"], "the-api-key");
        assert_eq!(json["is_active"], true);
        assert_eq!(json["usage_count"], 0);
        assert!(json["reset_at"].is_string());
    }

    #[test]
    fn test_create_request_plan_is_optional() {
        let empty: CreateSubscriptionRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.plan.is_none());

        let named: CreateSubscriptionRequest =
            serde_json::from_str(r#"{"plan": "pro"}"#).unwrap();
        assert_eq!(named.plan.as_deref(), Some("pro"));
    }
}
