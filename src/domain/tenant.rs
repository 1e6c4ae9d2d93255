//! Tenant scoping capability shared by resource repositories

use async_trait::async_trait;

use crate::domain::subscription::SubscriptionId;
use crate::domain::DomainError;

/// Capability for repositories whose rows belong to a tenant
///
/// Handlers receive the resolved subscription from the authentication gate
/// and pass it straight through; every read goes through this filter and is
/// never re-validated downstream.
#[async_trait]
pub trait TenantScoped<T>: Send + Sync {
    /// List the entities owned by the given tenant, newest first
    async fn list_for_tenant(&self, tenant: &SubscriptionId) -> Result<Vec<T>, DomainError>;
}
