//! In-memory store implementations for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use storefront_catalog::{Category, Product};
use storefront_core::ProductId;

use super::{CategoryStore, ProductStore, StoreError};

/// In-memory category store keyed by name.
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    inner: RwLock<HashMap<String, Category>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Storage("category lock poisoned".to_string()))?;
        Ok(map.get(name).cloned())
    }

    async fn get_or_create(&self, name: &str) -> Result<Category, StoreError> {
        // Single write lock makes the insert-if-absent atomic in-process.
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Storage("category lock poisoned".to_string()))?;
        let category = map
            .entry(name.to_string())
            .or_insert_with(|| Category::new(name));
        Ok(category.clone())
    }
}

/// In-memory product store keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(&self, pred: impl Fn(&Product) -> bool) -> Result<Vec<Product>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Storage("product lock poisoned".to_string()))?;
        let mut products: Vec<Product> = map.values().filter(|p| pred(p)).cloned().collect();
        // UUIDv7 ids are time-ordered, so this is insertion order.
        products.sort_by_key(|p| *p.id.as_uuid());
        Ok(products)
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Storage("product lock poisoned".to_string()))?;
        if map.contains_key(&product.id) {
            return Err(StoreError::Conflict(format!(
                "product already exists: {}",
                product.id
            )));
        }
        map.insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Storage("product lock poisoned".to_string()))?;
        match map.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Storage("product lock poisoned".to_string()))?;
        match map.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Storage("product lock poisoned".to_string()))?;
        Ok(map.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        self.filtered(|_| true)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        self.filtered(|p| p.category.name == category)
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Product>, StoreError> {
        self.filtered(|p| p.brand == brand)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        self.filtered(|p| p.name == name)
    }

    async fn find_by_category_and_brand(
        &self,
        category: &str,
        brand: &str,
    ) -> Result<Vec<Product>, StoreError> {
        self.filtered(|p| p.category.name == category && p.brand == brand)
    }

    async fn find_by_brand_and_name(
        &self,
        brand: &str,
        name: &str,
    ) -> Result<Vec<Product>, StoreError> {
        self.filtered(|p| p.brand == brand && p.name == name)
    }

    async fn count_by_brand_and_name(&self, brand: &str, name: &str) -> Result<u64, StoreError> {
        Ok(self
            .filtered(|p| p.brand == brand && p.name == name)?
            .len() as u64)
    }
}
