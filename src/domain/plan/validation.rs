//! Plan validation utilities

use thiserror::Error;

/// Errors that can occur during plan validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanValidationError {
    #[error("Plan slug cannot be empty")]
    EmptySlug,

    #[error("Plan slug exceeds maximum length of {0} characters")]
    SlugTooLong(usize),

    #[error("Plan slug must start with a letter or number")]
    InvalidSlugStart,

    #[error("Plan slug must end with a letter or number")]
    InvalidSlugEnd,

    #[error("Plan slug contains invalid character: '{0}'. Only lowercase letters, digits and hyphens are allowed")]
    InvalidSlugCharacter(char),

    #[error("Plan slug cannot contain consecutive hyphens")]
    ConsecutiveHyphens,

    #[error("Plan quota must be greater than zero")]
    ZeroQuota,

    #[error("Plan period must be at least one day")]
    ZeroPeriod,
}

const MAX_PLAN_SLUG_LENGTH: usize = 50;

/// Validate a plan slug
///
/// Rules:
/// - Cannot be empty
/// - Maximum 50 characters
/// - Only lowercase letters, digits and hyphens
/// - Must start and end with a letter or digit
/// - No consecutive hyphens
pub fn validate_plan_slug(slug: &str) -> Result<(), PlanValidationError> {
    if slug.is_empty() {
        return Err(PlanValidationError::EmptySlug);
    }

    if slug.len() > MAX_PLAN_SLUG_LENGTH {
        return Err(PlanValidationError::SlugTooLong(MAX_PLAN_SLUG_LENGTH));
    }

    let chars: Vec<char> = slug.chars().collect();

    if !chars[0].is_ascii_alphanumeric() {
        return Err(PlanValidationError::InvalidSlugStart);
    }

    if !chars[chars.len() - 1].is_ascii_alphanumeric() {
        return Err(PlanValidationError::InvalidSlugEnd);
    }

    let mut prev_hyphen = false;

    for c in &chars {
        if *c == '-' {
            if prev_hyphen {
                return Err(PlanValidationError::ConsecutiveHyphens);
            }
            prev_hyphen = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            prev_hyphen = false;
        } else {
            return Err(PlanValidationError::InvalidSlugCharacter(*c));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plan_slugs() {
        assert!(validate_plan_slug("free").is_ok());
        assert!(validate_plan_slug("pro").is_ok());
        assert!(validate_plan_slug("enterprise-2024").is_ok());
        assert!(validate_plan_slug("a").is_ok());
    }

    #[test]
    fn test_empty_slug() {
        assert_eq!(validate_plan_slug(""), Err(PlanValidationError::EmptySlug));
    }

    #[test]
    fn test_too_long_slug() {
        let long_slug = "a".repeat(51);
        assert_eq!(
            validate_plan_slug(&long_slug),
            Err(PlanValidationError::SlugTooLong(50))
        );
    }

    #[test]
    fn test_invalid_start_and_end() {
        assert_eq!(
            validate_plan_slug("-free"),
            Err(PlanValidationError::InvalidSlugStart)
        );
        assert_eq!(
            validate_plan_slug("free-"),
            Err(PlanValidationError::InvalidSlugEnd)
        );
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            validate_plan_slug("Free"),
            Err(PlanValidationError::InvalidSlugCharacter('F'))
        );
        assert_eq!(
            validate_plan_slug("my_plan"),
            Err(PlanValidationError::InvalidSlugCharacter('_'))
        );
    }

    #[test]
    fn test_consecutive_hyphens() {
        assert_eq!(
            validate_plan_slug("my--plan"),
            Err(PlanValidationError::ConsecutiveHyphens)
        );
    }
}
