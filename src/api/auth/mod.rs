//! Authentication API endpoints
//!
//! Registration and login for tenant accounts, issuing JWT session tokens.

use axum::{extract::State, routing::post, Router};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::account::Account;
use crate::infrastructure::account::RegisterAccountRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub confirm_password: String,
    #[validate(length(min = 1, max = 50))]
    pub full_name: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Session response returned by both endpoints
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub account: AccountResponse,
    pub expires_at: String,
}

/// Account representation (safe to expose)
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub created_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            email: account.email().to_string(),
            full_name: account.full_name().to_string(),
            created_at: account.created_at().to_rfc3339(),
        }
    }
}

/// Register a new account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    if request.password != request.confirm_password {
        return Err(ApiError::bad_request("Passwords do not match").with_param("confirm_password"));
    }

    let account = state
        .account_service
        .register(RegisterAccountRequest {
            email: request.email,
            full_name: request.full_name,
            password: request.password,
        })
        .await
        .map_err(ApiError::from)?;

    issue_session(&state, &account)
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let account = state
        .account_service
        .authenticate(&request.email, &request.password)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    issue_session(&state, &account)
}

fn issue_session(state: &AppState, account: &Account) -> Result<Json<SessionResponse>, ApiError> {
    let token = state
        .jwt_service
        .generate(account)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let expires_at = Utc::now() + Duration::hours(state.jwt_service.expiration_hours() as i64);

    Ok(Json(SessionResponse {
        token,
        account: AccountResponse::from(account),
        expires_at: expires_at.to_rfc3339(),
    }))
}
