//! Order entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::subscription::SubscriptionId;

/// Order identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tenant-scoped order
///
/// The human-facing order number is a ULID: sortable by creation time and
/// unique without coordination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    /// Owning tenant
    subscription_id: SubscriptionId,
    /// Human-facing order number (ULID)
    order_number: String,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order with a freshly generated order number
    pub fn new(subscription_id: SubscriptionId) -> Self {
        Self {
            id: OrderId::new(),
            subscription_id,
            order_number: ulid::Ulid::new().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn subscription_id(&self) -> &SubscriptionId {
        &self.subscription_id
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
