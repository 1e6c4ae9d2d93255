//! Account service for registration and authentication

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{
    validate_email, validate_full_name, validate_password, Account, AccountId, AccountRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterAccountRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Account service for registration and login
#[derive(Debug)]
pub struct AccountService<R: AccountRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: AccountRepository, H: PasswordHasher> AccountService<R, H> {
    /// Create a new account service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new account
    pub async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError> {
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_full_name(&request.full_name)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict(format!(
                "Account with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let account = Account::new(&request.email, &request.full_name, password_hash);

        let created = self.repository.create(account).await?;
        info!(account_id = %created.id(), "Account registered");

        Ok(created)
    }

    /// Authenticate an account with email and password
    ///
    /// Returns `None` for unknown emails, suspended accounts and wrong
    /// passwords alike; callers surface one generic credential failure.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, DomainError> {
        let account = match self.repository.get_by_email(email).await? {
            Some(a) => a,
            None => return Ok(None),
        };

        if !account.is_active() {
            return Ok(None);
        }

        if !self.hasher.verify(password, account.password_hash()) {
            return Ok(None);
        }

        Ok(Some(account))
    }

    /// Get an account by ID
    pub async fn get(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        self.repository.get(id).await
    }

    /// Count registered accounts
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
