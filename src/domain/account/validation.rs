//! Account validation utilities

use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during account validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccountValidationError {
    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Full name cannot be empty")]
    EmptyFullName,

    #[error("Full name exceeds maximum length of {0} characters")]
    FullNameTooLong(usize),
}

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_FULL_NAME_LENGTH: usize = 50;

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), AccountValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(AccountValidationError::InvalidEmail)
    }
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), AccountValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AccountValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

/// Validate a full name
pub fn validate_full_name(full_name: &str) -> Result<(), AccountValidationError> {
    if full_name.trim().is_empty() {
        return Err(AccountValidationError::EmptyFullName);
    }
    if full_name.len() > MAX_FULL_NAME_LENGTH {
        return Err(AccountValidationError::FullNameTooLong(MAX_FULL_NAME_LENGTH));
    }
    Ok(())
}
