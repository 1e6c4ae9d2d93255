//! Plan registry infrastructure

mod repository;

pub use repository::InMemoryPlanRepository;
