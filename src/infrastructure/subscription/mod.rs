//! Subscription infrastructure - storage and lifecycle service

mod repository;
mod service;

pub use repository::InMemorySubscriptionRepository;
pub use service::SubscriptionService;
