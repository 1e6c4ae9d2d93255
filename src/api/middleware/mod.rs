//! Request middleware - authentication extractors

mod auth;
mod user_auth;

pub use auth::{extract_api_key, RequireSubscription, API_KEY_HEADER};
pub use user_auth::{extract_bearer_token, RequireAccount};
