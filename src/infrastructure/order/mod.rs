//! Order infrastructure - storage and service

mod repository;
mod service;

pub use repository::InMemoryOrderRepository;
pub use service::OrderService;
