//! Authenticated session data.

use bluefruit_core::{CustomerId, CustomerRole, Email};
use serde::{Deserialize, Serialize};

/// The cached identity of the logged-in user.
///
/// Loaded once at login, persisted locally, and attached to carts and
/// orders for attribution. Role gating happens at login; the cart/checkout
/// core does not re-validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: CustomerId,
    pub name: String,
    pub email: Email,
    pub role: CustomerRole,
}
