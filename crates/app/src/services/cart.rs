//! Cart repository: sole owner of cart state.
//!
//! Every mutation is applied synchronously to the in-memory list, then the
//! snapshot is written through to the device store. The in-memory state is
//! authoritative for the rest of the session; a failed write is logged and
//! never surfaced to the caller, because cart UX must not block on storage
//! errors. The read-then-sync-mutate-then-async-persist ordering means two
//! same-process callers can never lose each other's updates.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::{Cart, LineItem, NewLineItem};
use crate::store::{KeyValueStore, keys};
use bluefruit_core::Money;

/// Owns the canonical list of cart line items.
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
    // None until the stored cart has been restored for this process
    items: Mutex<Option<Vec<LineItem>>>,
}

impl CartRepository {
    /// Create a repository over the given store. The persisted cart is
    /// restored lazily, at first access.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            items: Mutex::new(None),
        }
    }

    /// Current cart snapshot, restoring from the store on first access.
    ///
    /// Absent or malformed stored data yields an empty cart; the cart is
    /// best-effort convenience state, never a fatal error.
    pub async fn load(&self) -> Cart {
        let guard = {
            let mut slot = self.items.lock().await;
            self.restore_into(&mut slot).await;
            slot.clone().unwrap_or_default()
        };
        Cart {
            owner: None,
            items: guard,
        }
    }

    /// Add a product to the cart.
    ///
    /// If a line with the same item key already exists, its quantity grows
    /// by the added quantity; otherwise the item is appended, preserving
    /// insertion order.
    pub async fn add(&self, new_item: NewLineItem) -> Cart {
        let line = new_item.into_line_item();
        self.mutate(move |items| {
            if let Some(existing) = items.iter_mut().find(|i| i.item_key == line.item_key) {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            } else {
                items.push(line);
            }
        })
        .await
    }

    /// Adjust a line's quantity by `delta`, clamping the result to a
    /// minimum of one. Decrementing below one is a floor, not a removal;
    /// removal is explicit. Unknown keys are a no-op.
    pub async fn update_quantity(&self, item_key: &str, delta: i64) -> Cart {
        self.mutate(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.item_key == item_key) {
                let updated = i64::from(item.quantity).saturating_add(delta);
                item.quantity = u32::try_from(updated.max(1)).unwrap_or(u32::MAX);
            }
        })
        .await
    }

    /// Remove the line with the given key. Removing an absent key is a
    /// no-op, not an error.
    pub async fn remove(&self, item_key: &str) -> Cart {
        self.mutate(|items| {
            items.retain(|item| item.item_key != item_key);
        })
        .await
    }

    /// Empty the cart and persist the empty state.
    pub async fn clear(&self) -> Cart {
        self.mutate(|items| items.clear()).await
    }

    /// Sum of line totals; zero for an empty cart.
    pub async fn grand_total(&self) -> Money {
        self.load().await.grand_total()
    }

    /// Apply a mutation under the lock, then write the snapshot through.
    async fn mutate(&self, f: impl FnOnce(&mut Vec<LineItem>)) -> Cart {
        let snapshot = {
            let mut slot = self.items.lock().await;
            self.restore_into(&mut slot).await;
            let items = slot.get_or_insert_with(Vec::new);
            f(items);
            items.clone()
        };

        self.persist(&snapshot).await;

        Cart {
            owner: None,
            items: snapshot,
        }
    }

    async fn restore_into(&self, slot: &mut Option<Vec<LineItem>>) {
        if slot.is_some() {
            return;
        }

        let items = match self.store.get(keys::CART).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!("stored cart is malformed, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read stored cart, starting empty: {e}");
                Vec::new()
            }
        };

        *slot = Some(items);
    }

    async fn persist(&self, items: &[LineItem]) {
        match serde_json::to_string(items) {
            Ok(raw) => {
                if let Err(e) = self.store.set(keys::CART, raw).await {
                    tracing::warn!("failed to persist cart, in-memory state remains: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize cart: {e}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use async_trait::async_trait;
    use bluefruit_core::ProductId;
    use rust_decimal::Decimal;

    fn new_item(product: &str, variant: &str, quantity: u32, price: &str) -> NewLineItem {
        NewLineItem {
            product_id: ProductId::new(product),
            name: format!("Product {product}"),
            unit_price: Money::new(price.parse::<Decimal>().unwrap()),
            quantity,
            variant_label: variant.to_owned(),
            image_ref: String::new(),
        }
    }

    fn repo() -> (Arc<MemoryStore>, CartRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = CartRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn test_add_merges_same_variant() {
        let (_, repo) = repo();
        repo.add(new_item("P1", "Naranja", 2, "4.50")).await;
        let cart = repo.add(new_item("P1", "Naranja", 1, "4.50")).await;

        assert_eq!(cart.items.len(), 1);
        let line = &cart.items[0];
        assert_eq!(line.quantity, 3);
        assert_eq!(line.line_total().display(), "$13.50");
    }

    #[tokio::test]
    async fn test_add_keeps_variants_separate() {
        let (_, repo) = repo();
        repo.add(new_item("P1", "Naranja", 1, "4.50")).await;
        let cart = repo.add(new_item("P1", "Fresa", 1, "4.50")).await;

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].item_key, "P1_Naranja");
        assert_eq!(cart.items[1].item_key, "P1_Fresa");
    }

    #[tokio::test]
    async fn test_repeated_adds_sum_quantities() {
        let (_, repo) = repo();
        for quantity in [1, 2, 3] {
            repo.add(new_item("P1", "", quantity, "2.50")).await;
        }

        let cart = repo.load().await;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 6);
    }

    #[tokio::test]
    async fn test_remove_then_add_starts_fresh() {
        let (_, repo) = repo();
        repo.add(new_item("P1", "Naranja", 5, "4.50")).await;
        repo.remove("P1_Naranja").await;
        let cart = repo.add(new_item("P1", "Naranja", 2, "4.50")).await;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_update_quantity_clamps_at_one() {
        let (_, repo) = repo();
        repo.add(new_item("P1", "", 2, "4.50")).await;

        let cart = repo.update_quantity("P1", -10).await;
        assert_eq!(cart.items[0].quantity, 1);

        // Still present: decrement is a floor, not a removal
        let cart = repo.update_quantity("P1", -1).await;
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_update_quantity_unknown_key_is_noop() {
        let (_, repo) = repo();
        repo.add(new_item("P1", "", 2, "4.50")).await;
        let cart = repo.update_quantity("P9", 5).await;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_remove_unknown_key_is_noop() {
        let (_, repo) = repo();
        repo.add(new_item("P1", "", 1, "4.50")).await;
        let cart = repo.remove("P9").await;
        assert_eq!(cart.items.len(), 1);
    }

    #[tokio::test]
    async fn test_grand_total() {
        let (_, repo) = repo();
        repo.add(new_item("P1", "", 2, "4.50")).await;
        repo.add(new_item("P2", "", 1, "2.25")).await;
        assert_eq!(repo.grand_total().await.display(), "$11.25");
    }

    #[tokio::test]
    async fn test_empty_cart_total_is_zero() {
        let (_, repo) = repo();
        assert_eq!(repo.grand_total().await, Money::ZERO);
    }

    #[tokio::test]
    async fn test_persists_after_every_mutation() {
        let (store, repo) = repo();
        repo.add(new_item("P1", "", 1, "4.50")).await;

        let raw = store.get(keys::CART).await.unwrap().unwrap();
        let stored: Vec<LineItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);

        repo.clear().await;
        let raw = store.get(keys::CART).await.unwrap().unwrap();
        assert_eq!(raw, "[]");
    }

    #[tokio::test]
    async fn test_restores_from_store() {
        let store = Arc::new(MemoryStore::new());
        {
            let repo = CartRepository::new(store.clone());
            repo.add(new_item("P1", "Naranja", 2, "4.50")).await;
        }

        // A fresh repository over the same store sees the persisted cart
        let repo = CartRepository::new(store);
        let cart = repo.load().await;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_malformed_stored_cart_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CART, "{broken".to_owned()).await.unwrap();

        let repo = CartRepository::new(store);
        assert!(repo.load().await.is_empty());
    }

    /// Store whose writes always fail, to prove in-memory state survives.
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[tokio::test]
    async fn test_write_failure_keeps_memory_authoritative() {
        let repo = CartRepository::new(Arc::new(BrokenStore));
        let cart = repo.add(new_item("P1", "", 2, "4.50")).await;
        assert_eq!(cart.items.len(), 1);

        // Later operations still see the item added before the failed write
        let cart = repo.update_quantity("P1", 1).await;
        assert_eq!(cart.items[0].quantity, 3);
    }
}
