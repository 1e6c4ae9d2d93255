//! Order domain - tenant-scoped orders

mod entity;
mod repository;

pub use entity::{Order, OrderId};
pub use repository::OrderRepository;
