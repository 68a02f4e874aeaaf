//! Backend selection and the service facade handlers talk to.
//!
//! `USE_PERSISTENT_STORES=true` selects Postgres + Redis (requires the
//! `redis` feature); the default is an in-memory backend for dev/test.

use std::sync::Arc;

use storefront_catalog::{Product, ProductDraft, ProductPatch};
use storefront_core::ProductId;
use storefront_infra::{
    CatalogError, CatalogService, InMemoryCategoryStore, InMemoryProductCache, InMemoryProductStore,
};

#[cfg(feature = "redis")]
use storefront_infra::{ensure_schema, PostgresCategoryStore, PostgresProductStore, RedisProductCache};
#[cfg(feature = "redis")]
use sqlx::PgPool;

type InMemoryCatalog = CatalogService<
    Arc<InMemoryProductStore>,
    Arc<InMemoryCategoryStore>,
    Arc<InMemoryProductCache>,
>;

#[cfg(feature = "redis")]
type PersistentCatalog = CatalogService<PostgresProductStore, PostgresCategoryStore, RedisProductCache>;

#[derive(Clone)]
pub enum AppServices {
    InMemory { catalog: InMemoryCatalog },
    #[cfg(feature = "redis")]
    Persistent { catalog: PersistentCatalog },
}

pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        #[cfg(feature = "redis")]
        {
            return build_persistent_services().await;
        }
        #[cfg(not(feature = "redis"))]
        {
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but redis feature not enabled, falling back to in-memory"
            );
            return build_in_memory_services();
        }
    }

    build_in_memory_services()
}

pub fn build_in_memory_services() -> AppServices {
    let products = Arc::new(InMemoryProductStore::new());
    let categories = Arc::new(InMemoryCategoryStore::new());
    let cache = Arc::new(InMemoryProductCache::new());

    AppServices::InMemory {
        catalog: CatalogService::new(products, categories, cache),
    }
}

#[cfg(feature = "redis")]
async fn build_persistent_services() -> AppServices {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");
    ensure_schema(&pool).await.expect("Failed to ensure schema");

    let products = PostgresProductStore::new(pool.clone());
    let categories = PostgresCategoryStore::new(pool);
    let cache = RedisProductCache::new(&redis_url, None).expect("Failed to create Redis cache");

    AppServices::Persistent {
        catalog: CatalogService::new(products, categories, cache),
    }
}

impl AppServices {
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => catalog.add_product(draft).await,
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => catalog.add_product(draft).await,
        }
    }

    pub async fn get_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => catalog.get_product_by_id(id).await,
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => catalog.get_product_by_id(id).await,
        }
    }

    pub async fn delete_product_by_id(&self, id: ProductId) -> Result<(), CatalogError> {
        match self {
            AppServices::InMemory { catalog } => catalog.delete_product_by_id(id).await,
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => catalog.delete_product_by_id(id).await,
        }
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => catalog.update_product(id, patch).await,
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => catalog.update_product(id, patch).await,
        }
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => catalog.get_all_products().await,
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => catalog.get_all_products().await,
        }
    }

    pub async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => catalog.get_products_by_category(category).await,
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => catalog.get_products_by_category(category).await,
        }
    }

    pub async fn get_products_by_brand(&self, brand: &str) -> Result<Vec<Product>, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => catalog.get_products_by_brand(brand).await,
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => catalog.get_products_by_brand(brand).await,
        }
    }

    pub async fn get_products_by_name(&self, name: &str) -> Result<Vec<Product>, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => catalog.get_products_by_name(name).await,
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => catalog.get_products_by_name(name).await,
        }
    }

    pub async fn get_products_by_category_and_brand(
        &self,
        category: &str,
        brand: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => {
                catalog.get_products_by_category_and_brand(category, brand).await
            }
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => {
                catalog.get_products_by_category_and_brand(category, brand).await
            }
        }
    }

    pub async fn get_products_by_brand_and_name(
        &self,
        brand: &str,
        name: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => {
                catalog.get_products_by_brand_and_name(brand, name).await
            }
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => {
                catalog.get_products_by_brand_and_name(brand, name).await
            }
        }
    }

    pub async fn count_products_by_brand_and_name(
        &self,
        brand: &str,
        name: &str,
    ) -> Result<u64, CatalogError> {
        match self {
            AppServices::InMemory { catalog } => {
                catalog.count_products_by_brand_and_name(brand, name).await
            }
            #[cfg(feature = "redis")]
            AppServices::Persistent { catalog } => {
                catalog.count_products_by_brand_and_name(brand, name).await
            }
        }
    }
}
