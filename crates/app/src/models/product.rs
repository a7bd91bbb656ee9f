//! Catalog product data.

use bluefruit_core::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A catalog product as the core sees it.
///
/// Flavor labels are already normalized at the API boundary; this type
/// never carries raw escaped strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Whether this product has a variant (flavor) dimension.
    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.flavors.is_empty()
    }
}
