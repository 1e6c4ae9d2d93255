//! Account infrastructure - storage, hashing and the registration service

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryAccountRepository;
pub use service::{AccountService, RegisterAccountRequest};
