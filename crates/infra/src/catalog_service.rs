//! Catalog orchestration: category resolution, create/merge-update/delete,
//! filter pass-throughs, and cache consistency.
//!
//! Cache discipline: writes go to the store first, then the cache. Reads by
//! id consult the cache and back-fill on miss. Deletes evict after the row
//! is gone. List/filter results are never cached (the source system carried
//! no durable contract for collection-level entries).

use storefront_catalog::{Product, ProductDraft, ProductPatch};
use storefront_core::{DomainError, ProductId};
use tracing::info;

use crate::cache::ProductCache;
use crate::store::{CategoryStore, ProductStore, StoreError};

/// Service-level error, mapped to HTTP status codes by the API layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// Product (or, on update, the referenced category) does not exist.
    #[error("not found")]
    NotFound,

    /// The request payload failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Underlying storage failure.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => CatalogError::NotFound,
            other => CatalogError::Store(other),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => CatalogError::NotFound,
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                CatalogError::Validation(msg)
            }
        }
    }
}

/// Orchestrates product/category operations over a store pair and a cache.
#[derive(Debug, Clone)]
pub struct CatalogService<PS, CS, C> {
    products: PS,
    categories: CS,
    cache: C,
}

impl<PS, CS, C> CatalogService<PS, CS, C>
where
    PS: ProductStore,
    CS: CategoryStore,
    C: ProductCache,
{
    pub fn new(products: PS, categories: CS, cache: C) -> Self {
        Self {
            products,
            categories,
            cache,
        }
    }

    /// Create a product, creating its category on demand.
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        draft.validate()?;

        // Atomic insert-if-absent; concurrent creates converge on one row.
        let category = self.categories.get_or_create(draft.category.trim()).await?;
        info!(category = %category.name, "resolved category for new product");

        let product = Product::from_draft(draft, category);
        self.products.insert(&product).await?;
        self.cache.put(&product).await;
        info!(product_id = %product.id, "product added");
        Ok(product)
    }

    /// Fetch a product by id, cache-first.
    pub async fn get_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.cache.get(id).await {
            return Ok(product);
        }

        match self.products.find_by_id(id).await? {
            Some(product) => {
                self.cache.put(&product).await;
                Ok(product)
            }
            None => Err(CatalogError::NotFound),
        }
    }

    /// Delete a product by id; evicts the cache entry afterwards.
    pub async fn delete_product_by_id(&self, id: ProductId) -> Result<(), CatalogError> {
        self.products.delete(id).await?;
        self.cache.evict(id).await;
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Partial update: only the patch's `Some` fields overwrite the stored
    /// product, and they must satisfy the same invariants as at create.
    /// A supplied category name must resolve to an existing category;
    /// updates never auto-create one.
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, CatalogError> {
        patch.validate()?;

        // The store is authoritative here, not the cache.
        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound)?;

        patch.apply_to(&mut product);

        if let Some(category_name) = &patch.category {
            product.category = self
                .categories
                .find_by_name(category_name.trim())
                .await?
                .ok_or(CatalogError::NotFound)?;
        }

        self.products.update(&product).await?;
        self.cache.put(&product).await;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list_all().await?)
    }

    pub async fn get_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.find_by_category(category).await?)
    }

    pub async fn get_products_by_brand(&self, brand: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.find_by_brand(brand).await?)
    }

    pub async fn get_products_by_name(&self, name: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.find_by_name(name).await?)
    }

    pub async fn get_products_by_category_and_brand(
        &self,
        category: &str,
        brand: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.find_by_category_and_brand(category, brand).await?)
    }

    pub async fn get_products_by_brand_and_name(
        &self,
        brand: &str,
        name: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.find_by_brand_and_name(brand, name).await?)
    }

    pub async fn count_products_by_brand_and_name(
        &self,
        brand: &str,
        name: &str,
    ) -> Result<u64, CatalogError> {
        Ok(self.products.count_by_brand_and_name(brand, name).await?)
    }
}
