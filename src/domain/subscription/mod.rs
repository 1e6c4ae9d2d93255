//! Subscription domain - tenant subscriptions, API keys and usage metering

mod entity;
mod repository;

pub use entity::{Subscription, SubscriptionId, UsageOutcome};
pub use repository::SubscriptionRepository;
