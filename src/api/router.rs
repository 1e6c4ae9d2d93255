use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;
use super::v1;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints (no auth required)
        .nest("/auth", auth::create_auth_router())
        // Tenant-facing v1 API
        .nest("/v1", v1::create_v1_router())
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::middleware::API_KEY_HEADER;
    use crate::domain::account::Account;
    use crate::domain::subscription::Subscription;
    use crate::infrastructure::account::RegisterAccountRequest;

    async fn test_state() -> AppState {
        crate::create_app_state().await.unwrap()
    }

    async fn seeded_tenant(state: &AppState) -> (Account, Subscription) {
        let account = state
            .account_service
            .register(RegisterAccountRequest {
                email: format!("{}@example.com", uuid::Uuid::new_v4().simple()),
                full_name: "Test Merchant".to_string(),
                password: "a-long-password".to_string(),
            })
            .await
            .unwrap();

        let subscription = state
            .subscription_service
            .create(*account.id(), None)
            .await
            .unwrap();

        (account, subscription)
    }

    fn get_products(api_key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/v1/products");
        if let Some(key) = api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let router = create_router(test_state().await);

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_gate_rejects_missing_key() {
        let router = create_router(test_state().await);

        let response = router.oneshot(get_products(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["type"], "authentication_error");
    }

    #[tokio::test]
    async fn test_gate_rejects_unknown_key() {
        let router = create_router(test_state().await);

        let response = router
            .oneshot(get_products(Some("not-a-real-key")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gate_rejects_suspended_subscription() {
        let state = test_state().await;
        let (_, subscription) = seeded_tenant(&state).await;

        state
            .subscription_service
            .set_active(subscription.id(), false)
            .await
            .unwrap();

        let router = create_router(state.clone());
        let response = router
            .oneshot(get_products(Some(subscription.api_key())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "subscription_suspended");

        // The rejected request was not metered
        let unchanged = state
            .subscription_service
            .get(subscription.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.usage_count(), 0);
    }

    #[tokio::test]
    async fn test_gate_admits_and_meters() {
        let state = test_state().await;
        let (_, subscription) = seeded_tenant(&state).await;

        let router = create_router(state.clone());

        for expected in 1..=3u32 {
            let response = router
                .clone()
                .oneshot(get_products(Some(subscription.api_key())))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let metered = state
                .subscription_service
                .get(subscription.id())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(metered.usage_count(), expected);
        }
    }

    #[tokio::test]
    async fn test_rotated_key_swaps_at_the_gate() {
        let state = test_state().await;
        let (account, subscription) = seeded_tenant(&state).await;
        let old_key = subscription.api_key().to_string();

        let rotated = state
            .subscription_service
            .rotate_key(*account.id())
            .await
            .unwrap();

        let router = create_router(state);

        let response = router
            .clone()
            .oneshot(get_products(Some(&old_key)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = router
            .oneshot(get_products(Some(rotated.api_key())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_subscription_endpoint() {
        let state = test_state().await;

        let account = state
            .account_service
            .register(RegisterAccountRequest {
                email: "owner@example.com".to_string(),
                full_name: "Owner".to_string(),
                password: "a-long-password".to_string(),
            })
            .await
            .unwrap();
        let token = state.jwt_service.generate(&account).unwrap();

        let router = create_router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/v1/subscriptions")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"plan": "free"}"#))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["plan"]["slug"], "free");
        assert_eq!(json["usage_count"], 0);
        assert_eq!(json["is_active"], true);
        assert!(json["api_key"].as_str().unwrap().len() >= 48);

        // A second create for the same account is rejected
        let request = Request::builder()
            .method("POST")
            .uri("/v1/subscriptions")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tenant_isolation_end_to_end() {
        let state = test_state().await;
        let (_, tenant_a) = seeded_tenant(&state).await;
        let (_, tenant_b) = seeded_tenant(&state).await;

        let router = create_router(state);

        // Tenant A creates a category
        let request = Request::builder()
            .method("POST")
            .uri("/v1/categories")
            .header(API_KEY_HEADER, tenant_a.api_key())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name": "Peripherals"}"#))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Tenant B sees an empty catalog
        let request = Request::builder()
            .uri("/v1/categories")
            .header(API_KEY_HEADER, tenant_b.api_key())
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 0);
    }
}
