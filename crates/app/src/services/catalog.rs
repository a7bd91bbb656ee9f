//! Product catalog reads with short-lived caching.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use bluefruit_core::ProductId;

use crate::api::{ApiError, RemoteApi};
use crate::models::Product;

/// How long catalog responses stay cached.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    Product(String),
}

/// Cached value types.
#[derive(Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Arc<Product>),
}

/// Read-through catalog over the remote API.
///
/// Product lists and single products are cached for five minutes; the
/// random-product endpoint is never cached, it exists to vary.
pub struct CatalogService {
    api: Arc<dyn RemoteApi>,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogService {
    /// Create a catalog service over the remote API.
    #[must_use]
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self { api, cache }
    }

    /// The full product list.
    ///
    /// # Errors
    ///
    /// Propagates any API error on a cache miss.
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.cache.get(&CacheKey::Products).await {
            return Ok(products.as_ref().clone());
        }

        let products = self.api.products().await?;
        self.cache
            .insert(
                CacheKey::Products,
                CacheValue::Products(Arc::new(products.clone())),
            )
            .await;
        Ok(products)
    }

    /// One product by id.
    ///
    /// # Errors
    ///
    /// Propagates any API error on a cache miss.
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(id.as_str().to_owned());

        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            return Ok(product.as_ref().clone());
        }

        let product = self.api.product(id).await?;
        self.cache
            .insert(key, CacheValue::Product(Arc::new(product.clone())))
            .await;
        Ok(product)
    }

    /// A random product for recommendations. Never cached.
    ///
    /// # Errors
    ///
    /// Propagates any API error.
    pub async fn random(&self) -> Result<Product, ApiError> {
        self.api.random_product().await
    }
}
