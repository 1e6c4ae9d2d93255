//! Plan domain - subscription tiers and the registry they live in

mod entity;
mod repository;
mod validation;

pub use entity::{Plan, PlanSlug};
pub use repository::PlanRepository;
pub use validation::{validate_plan_slug, PlanValidationError};
