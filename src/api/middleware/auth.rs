//! API key authentication gate
//!
//! Resolves the key-bearing header to a subscription, enforces the
//! active/quota state and meters the request before any handler runs.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::subscription::Subscription;
use crate::domain::DomainError;

/// Header carrying the raw API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Extractor that admits a request only with a valid, within-quota API key
///
/// Admission mutates persistent usage state: every request through this
/// extractor counts against the subscription's quota. The resolved
/// subscription is the tenant context for the handler.
#[derive(Debug, Clone)]
pub struct RequireSubscription(pub Subscription);

impl FromRequestParts<AppState> for RequireSubscription {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = extract_api_key(&parts.headers)?;

        debug!(
            key_prefix = %api_key.chars().take(8).collect::<String>(),
            "Authenticating API key"
        );

        let subscription = state
            .subscription_service
            .authenticate(&api_key)
            .await
            .map_err(ApiError::from)?;

        Ok(RequireSubscription(subscription))
    }
}

/// Extract the API key from the fixed request header
pub fn extract_api_key(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(API_KEY_HEADER)
        .ok_or(DomainError::MissingCredential)?;

    let key = value
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid X-API-Key header encoding"))?
        .trim();

    if key.is_empty() {
        return Err(DomainError::MissingCredential.into());
    }

    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_extract_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, "tenant-key-12345".parse().unwrap());

        let result = extract_api_key(&headers);
        assert_eq!(result.unwrap(), "tenant-key-12345");
    }

    #[test]
    fn test_header_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        let name: axum::http::HeaderName = "X-API-KEY".parse().unwrap();
        headers.insert(name, "tenant-key-12345".parse().unwrap());

        let result = extract_api_key(&headers);
        assert_eq!(result.unwrap(), "tenant-key-12345");
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();

        let err = extract_api_key(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_blank_header() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, "   ".parse().unwrap());

        let err = extract_api_key(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_trimmed_key() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, "  key-with-spaces  ".parse().unwrap());

        let result = extract_api_key(&headers);
        assert_eq!(result.unwrap(), "key-with-spaces");
    }
}
