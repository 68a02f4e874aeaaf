//! By-id product cache.
//!
//! Write-through: the service puts after create/update, evicts on delete,
//! and back-fills on read misses. Cache failures degrade to misses and
//! must never fail a request.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use storefront_catalog::Product;
use storefront_core::ProductId;

#[cfg(feature = "redis")]
mod redis_cache;
#[cfg(feature = "redis")]
pub use redis_cache::RedisProductCache;

/// Cache abstraction for products, keyed by id.
#[async_trait]
pub trait ProductCache: Send + Sync {
    async fn get(&self, id: ProductId) -> Option<Product>;
    async fn put(&self, product: &Product);
    async fn evict(&self, id: ProductId);
}

#[async_trait]
impl<C> ProductCache for Arc<C>
where
    C: ProductCache + ?Sized,
{
    async fn get(&self, id: ProductId) -> Option<Product> {
        (**self).get(id).await
    }

    async fn put(&self, product: &Product) {
        (**self).put(product).await
    }

    async fn evict(&self, id: ProductId) {
        (**self).evict(id).await
    }
}

/// In-memory product cache for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductCache {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductCache for InMemoryProductCache {
    async fn get(&self, id: ProductId) -> Option<Product> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    async fn put(&self, product: &Product) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(product.id, product.clone());
        }
    }

    async fn evict(&self, id: ProductId) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(&id);
        }
    }
}
