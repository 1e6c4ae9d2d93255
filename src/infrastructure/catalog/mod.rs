//! Catalog infrastructure - storage, slug derivation and the service

mod repository;
mod service;
mod slug;

pub use repository::{InMemoryCategoryRepository, InMemoryProductRepository};
pub use service::{CatalogService, CreateCategoryRequest, CreateProductRequest};
pub use slug::slugify;
