//! Redis-backed product cache.
//!
//! Stores products as JSON under `storefront:product:<id>` keys. The redis
//! client is synchronous, so every operation runs on the blocking thread
//! pool via `spawn_blocking`, keeping cache latency off the async executor.
//! Any Redis or serialization failure is logged at warn and treated as a
//! miss.

use std::sync::Arc;

use async_trait::async_trait;
use redis::Commands;
use tracing::warn;

use storefront_catalog::Product;
use storefront_core::ProductId;

use super::ProductCache;

const DEFAULT_KEY_PREFIX: &str = "storefront:product";

#[derive(Debug, Clone)]
pub struct RedisProductCache {
    client: Arc<redis::Client>,
    key_prefix: String,
}

impl RedisProductCache {
    /// Create a cache from a Redis connection URL (e.g. "redis://localhost:6379").
    pub fn new(redis_url: impl AsRef<str>, key_prefix: Option<String>) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url.as_ref())?;
        Ok(Self {
            client: Arc::new(client),
            key_prefix: key_prefix.unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
        })
    }

    fn key(&self, id: ProductId) -> String {
        format!("{}:{}", self.key_prefix, id)
    }
}

#[async_trait]
impl ProductCache for RedisProductCache {
    async fn get(&self, id: ProductId) -> Option<Product> {
        let client = self.client.clone();
        let key = self.key(id);

        let raw = tokio::task::spawn_blocking(move || -> Result<Option<String>, redis::RedisError> {
            let mut conn = client.get_connection()?;
            conn.get(key)
        })
        .await;

        let raw = match raw {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!("redis cache get failed for {id}: {e}");
                return None;
            }
            Err(e) => {
                warn!("redis cache get task failed for {id}: {e}");
                return None;
            }
        };

        raw.and_then(|json| match serde_json::from_str(&json) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!("redis cache entry for {id} is not decodable, ignoring: {e}");
                None
            }
        })
    }

    async fn put(&self, product: &Product) {
        let id = product.id;
        let json = match serde_json::to_string(product) {
            Ok(json) => json,
            Err(e) => {
                warn!("redis cache put: serialization failed for {id}: {e}");
                return;
            }
        };

        let client = self.client.clone();
        let key = self.key(id);
        let result = tokio::task::spawn_blocking(move || -> Result<(), redis::RedisError> {
            let mut conn = client.get_connection()?;
            conn.set(key, json)
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("redis cache put failed for {id}: {e}"),
            Err(e) => warn!("redis cache put task failed for {id}: {e}"),
        }
    }

    async fn evict(&self, id: ProductId) {
        let client = self.client.clone();
        let key = self.key(id);
        let result = tokio::task::spawn_blocking(move || -> Result<(), redis::RedisError> {
            let mut conn = client.get_connection()?;
            conn.del(key)
        })
        .await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("redis cache evict failed for {id}: {e}"),
            Err(e) => warn!("redis cache evict task failed for {id}: {e}"),
        }
    }
}
