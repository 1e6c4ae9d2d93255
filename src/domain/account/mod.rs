//! Account domain - tenant accounts behind the registration/login boundary

mod entity;
mod repository;
mod validation;

pub use entity::{Account, AccountId};
pub use repository::AccountRepository;
pub use validation::{
    validate_email, validate_full_name, validate_password, AccountValidationError,
};
