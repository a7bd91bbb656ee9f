//! Device-local key-value persistence.
//!
//! The mobile runtime persists small JSON documents under string keys. This
//! module abstracts that store behind [`KeyValueStore`] so the services can
//! run against the on-disk [`FileStore`] in the app and [`MemoryStore`] in
//! tests.
//!
//! Writes for a given key are last-writer-wins; the cart and session data
//! kept here are convenience state, not a ledger.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Ordered array of cart line items.
    pub const CART: &str = "cart";
    /// The authenticated session.
    pub const USER: &str = "user";
    /// Shipping address of the in-flight checkout attempt.
    pub const SHIPPING_ADDRESS: &str = "shippingAddress";
    /// Draft order of the in-flight checkout attempt.
    pub const DRAFT_ORDER: &str = "draftOrder";
}

/// Errors that can occur while reading or writing the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store contents could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An async string-keyed store of JSON-serialized values.
///
/// Implementations make no ordering guarantee across keys; callers tolerate
/// a stale last write winning.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove the value stored under `key`. Removing an absent key is not
    /// an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
