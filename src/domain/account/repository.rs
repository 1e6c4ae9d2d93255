//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Account, AccountId};
use crate::domain::DomainError;

/// Repository trait for account storage
#[async_trait]
pub trait AccountRepository: Send + Sync + Debug {
    /// Get an account by its ID
    async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// Look up an account by email
    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Persist a new account; fails with `Conflict` on a duplicate email
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Check if an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    /// Count stored accounts
    async fn count(&self) -> Result<usize, DomainError>;
}
