//! Persistence abstractions for the catalog.
//!
//! Two implementations exist for each store: an in-memory one (tests/dev)
//! and a Postgres one (production). Raw driver errors never cross this
//! boundary; everything is mapped into [`StoreError`].

use std::sync::Arc;

use async_trait::async_trait;

use storefront_catalog::{Category, Product};
use storefront_core::ProductId;

mod in_memory;
mod postgres;

pub use in_memory::{InMemoryCategoryStore, InMemoryProductStore};
pub use postgres::{ensure_schema, PostgresCategoryStore, PostgresProductStore};

/// Store-level error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The targeted row does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness or integrity constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other storage failure (connection, query, decode).
    #[error("storage error: {0}")]
    Storage(String),
}

/// Category persistence by natural key (name).
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError>;

    /// Atomic insert-if-absent: concurrent callers with the same name must
    /// all observe the same single row.
    async fn get_or_create(&self, name: &str) -> Result<Category, StoreError>;
}

/// Product persistence and filter queries.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: &Product) -> Result<(), StoreError>;

    /// Overwrite an existing row; `NotFound` if the id is absent.
    async fn update(&self, product: &Product) -> Result<(), StoreError>;

    /// Remove a row; `NotFound` if the id is absent.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError>;

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Product>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError>;

    async fn find_by_category_and_brand(
        &self,
        category: &str,
        brand: &str,
    ) -> Result<Vec<Product>, StoreError>;

    async fn find_by_brand_and_name(
        &self,
        brand: &str,
        name: &str,
    ) -> Result<Vec<Product>, StoreError>;

    async fn count_by_brand_and_name(&self, brand: &str, name: &str) -> Result<u64, StoreError>;
}

#[async_trait]
impl<S> CategoryStore for Arc<S>
where
    S: CategoryStore + ?Sized,
{
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        (**self).find_by_name(name).await
    }

    async fn get_or_create(&self, name: &str) -> Result<Category, StoreError> {
        (**self).get_or_create(name).await
    }
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        (**self).insert(product).await
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        (**self).update(product).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_all().await
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_category(category).await
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_brand(brand).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_name(name).await
    }

    async fn find_by_category_and_brand(
        &self,
        category: &str,
        brand: &str,
    ) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_category_and_brand(category, brand).await
    }

    async fn find_by_brand_and_name(
        &self,
        brand: &str,
        name: &str,
    ) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_brand_and_name(brand, name).await
    }

    async fn count_by_brand_and_name(&self, brand: &str, name: &str) -> Result<u64, StoreError> {
        (**self).count_by_brand_and_name(brand, name).await
    }
}
