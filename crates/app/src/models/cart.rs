//! Cart data model.

use bluefruit_core::{CustomerId, Money, ProductId};
use serde::{Deserialize, Serialize};

/// One product(+variant) entry and its quantity inside a cart.
///
/// `item_key` is the identity used for merge-on-add: it equals the product
/// id when the product has no variant dimension, otherwise
/// `productId + "_" + variantLabel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub item_key: String,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub variant_label: String,
    #[serde(default)]
    pub image_ref: String,
}

impl LineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Compose the cart identity of a product and an optional variant label.
#[must_use]
pub fn item_key(product_id: &ProductId, variant_label: &str) -> String {
    if variant_label.is_empty() {
        product_id.as_str().to_owned()
    } else {
        format!("{}_{variant_label}", product_id.as_str())
    }
}

/// Input to a cart `add` operation, before an item key is assigned.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub variant_label: String,
    pub image_ref: String,
}

impl NewLineItem {
    /// Turn the input into a stored line item, computing its key and
    /// clamping the quantity to at least one.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        let item_key = item_key(&self.product_id, &self.variant_label);
        LineItem {
            item_key,
            product_id: self.product_id,
            name: self.name,
            unit_price: self.unit_price,
            quantity: self.quantity.max(1),
            variant_label: self.variant_label,
            image_ref: self.image_ref,
        }
    }
}

/// A snapshot of the cart: ordered line items plus the owner, if known.
///
/// Insertion order is display order. The owner is `None` for an
/// anonymous/device-local cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    pub owner: Option<CustomerId>,
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Sum of all line totals; zero for an empty cart.
    #[must_use]
    pub fn grand_total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Attach an owner to this snapshot.
    #[must_use]
    pub fn with_owner(mut self, owner: Option<CustomerId>) -> Self {
        self.owner = owner;
        self
    }
}
