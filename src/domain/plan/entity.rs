//! Subscription plan entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_plan_slug, PlanValidationError};

/// Plan slug - lowercase alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlanSlug(String);

impl PlanSlug {
    /// Create a new PlanSlug after validation
    pub fn new(slug: impl Into<String>) -> Result<Self, PlanValidationError> {
        let slug = slug.into();
        validate_plan_slug(&slug)?;
        Ok(Self(slug))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlanSlug {
    type Error = PlanValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlanSlug> for String {
    fn from(slug: PlanSlug) -> Self {
        slug.0
    }
}

impl std::fmt::Display for PlanSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subscription tier definition
///
/// A plan caps how many metered API calls a subscription may make per usage
/// window. Plans are read-mostly: seeded at startup and looked up by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Unique slug identifying the tier (e.g. "free", "pro")
    slug: PlanSlug,
    /// Display name for the plan
    name: String,
    /// Description of the plan and its features
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// Maximum number of metered API calls per period
    api_quota: u32,
    /// Number of days after which the usage window resets
    period_days: u32,
}

impl Plan {
    /// Create a new plan
    ///
    /// Both the quota and the period must be positive.
    pub fn new(
        slug: PlanSlug,
        name: impl Into<String>,
        api_quota: u32,
        period_days: u32,
    ) -> Result<Self, PlanValidationError> {
        if api_quota == 0 {
            return Err(PlanValidationError::ZeroQuota);
        }
        if period_days == 0 {
            return Err(PlanValidationError::ZeroPeriod);
        }

        Ok(Self {
            slug,
            name: name.into(),
            description: None,
            api_quota,
            period_days,
        })
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // Getters

    pub fn slug(&self) -> &PlanSlug {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn api_quota(&self) -> u32 {
        self.api_quota
    }

    pub fn period_days(&self) -> u32 {
        self.period_days
    }
}
