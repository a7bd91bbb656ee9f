//! Status and role enums.

use serde::{Deserialize, Serialize};

/// Local status of a draft order during checkout.
///
/// `Failed` is non-terminal: the orchestrator keeps the draft and retries it
/// under the same order number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Built but not yet sent to the order API.
    #[default]
    Pending,
    /// Accepted by the order API.
    Submitted,
    /// Last submission attempt failed; eligible for retry.
    Failed,
}

impl OrderStatus {
    /// The status string the order API expects for a newly placed order.
    pub const WIRE_NEW: &'static str = "En proceso";
}

/// Role attached to an authenticated account.
///
/// Only [`CustomerRole::Customer`] may use this app; every other role is
/// rejected at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerRole {
    Customer,
    /// Any role this app does not model (e.g., back-office accounts).
    #[serde(other)]
    Other,
}

impl CustomerRole {
    /// Whether this role is allowed into the storefront.
    #[must_use]
    pub const fn may_shop(self) -> bool {
        matches!(self, Self::Customer)
    }
}
