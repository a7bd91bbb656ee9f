//! Draft orders and confirmations.

use bluefruit_core::{CustomerId, Money, OrderNumber, OrderStatus, ProductId, ServerOrderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::address::ShippingAddress;
use super::cart::Cart;

/// A sanitized order line: only the fields the order API models.
///
/// Variant labels and image references are presentation-only and are
/// dropped here; the API contract disallows extra fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

/// The submission-ready projection of a cart plus address.
///
/// The order number is minted once, when the cart is handed to checkout,
/// and never changes across retries of the same attempt - the server can
/// deduplicate resubmissions by number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrder {
    pub order_number: OrderNumber,
    pub items: Vec<OrderLine>,
    pub item_count: u32,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl DraftOrder {
    /// Build a draft from a cart snapshot, minting a fresh order number.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let items: Vec<OrderLine> = cart
            .items
            .iter()
            .map(|line| OrderLine {
                id: line.product_id.clone(),
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();

        Self {
            order_number: OrderNumber::mint(),
            item_count: cart.item_count(),
            total: cart.grand_total(),
            created_at: Utc::now(),
            status: OrderStatus::Pending,
            items,
        }
    }
}

/// The terminal success artifact of a checkout attempt.
///
/// Input to invoice/bill generation; a failure there never rolls back the
/// already-confirmed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub user_id: Option<CustomerId>,
    pub order_number: OrderNumber,
    pub server_order_id: Option<ServerOrderId>,
    pub items: Vec<OrderLine>,
    pub total: Money,
    pub address: ShippingAddress,
    pub confirmed_at: DateTime<Utc>,
}
