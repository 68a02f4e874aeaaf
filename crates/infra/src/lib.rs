//! Infrastructure layer: stores (Postgres + in-memory), cache, service wiring.

pub mod cache;
pub mod catalog_service;
pub mod store;

pub use cache::{InMemoryProductCache, ProductCache};
#[cfg(feature = "redis")]
pub use cache::RedisProductCache;
pub use catalog_service::{CatalogError, CatalogService};
pub use store::{CategoryStore, InMemoryCategoryStore, InMemoryProductStore, ProductStore, StoreError};
pub use store::{ensure_schema, PostgresCategoryStore, PostgresProductStore};
