//! Postgres-backed store implementations.
//!
//! Schema (see `db/schema.sql`):
//!
//! - `categories (id UUID PK, name TEXT UNIQUE NOT NULL)`
//! - `products  (id UUID PK, name, brand, price_cents BIGINT, inventory INT,
//!    description, category_id UUID NOT NULL REFERENCES categories)`
//!
//! ## Concurrency
//!
//! `get_or_create` relies on the unique constraint on `categories.name`:
//! `INSERT .. ON CONFLICT (name) DO NOTHING` followed by a lookup, so
//! concurrent callers with the same new name all converge on one row.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError`: unique violations (`23505`)
//! become `Conflict`, everything else becomes `Storage`. `NotFound` is
//! produced from affected-row counts, never from the driver.

use std::sync::Arc;

use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use tracing::instrument;

use storefront_catalog::{Category, Product};
use storefront_core::{CategoryId, ProductId};

use super::{CategoryStore, ProductStore, StoreError};

const UNIQUE_VIOLATION: &str = "23505";

fn map_sqlx_error(operation: &str, e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Conflict(format!("{operation}: {db_err}"));
        }
    }
    StoreError::Storage(format!("{operation}: {e}"))
}

fn row_to_product(row: &PgRow) -> Result<Product, StoreError> {
    let read = |e: sqlx::Error| StoreError::Storage(format!("decode product row: {e}"));
    Ok(Product {
        id: ProductId::from_uuid(row.try_get("id").map_err(read)?),
        name: row.try_get("name").map_err(read)?,
        brand: row.try_get("brand").map_err(read)?,
        price_cents: row.try_get("price_cents").map_err(read)?,
        inventory: row.try_get("inventory").map_err(read)?,
        description: row.try_get("description").map_err(read)?,
        category: Category {
            id: CategoryId::from_uuid(row.try_get("category_id").map_err(read)?),
            name: row.try_get("category_name").map_err(read)?,
        },
    })
}

/// Create the catalog tables if they do not exist yet.
///
/// Called once at startup. Mirrors `db/schema.sql`, which is the reference
/// copy for provisioning outside the service.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id   UUID PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| map_sqlx_error("create_categories_table", e))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id          UUID PRIMARY KEY,
            name        TEXT NOT NULL,
            brand       TEXT NOT NULL,
            price_cents BIGINT NOT NULL,
            inventory   INTEGER NOT NULL,
            description TEXT NOT NULL,
            category_id UUID NOT NULL REFERENCES categories (id)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| map_sqlx_error("create_products_table", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_brand ON products (brand)")
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("create_products_brand_index", e))?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_category_id ON products (category_id)")
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("create_products_category_index", e))?;

    Ok(())
}

const SELECT_PRODUCT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.brand,
        p.price_cents,
        p.inventory,
        p.description,
        c.id AS category_id,
        c.name AS category_name
    FROM products p
    JOIN categories c ON c.id = p.category_id
"#;

/// Postgres-backed category store.
#[derive(Debug, Clone)]
pub struct PostgresCategoryStore {
    pool: Arc<PgPool>,
}

impl PostgresCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl CategoryStore for PostgresCategoryStore {
    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_category_by_name", e))?;

        match row {
            Some(row) => {
                let read = |e: sqlx::Error| StoreError::Storage(format!("decode category row: {e}"));
                Ok(Some(Category {
                    id: CategoryId::from_uuid(row.try_get("id").map_err(read)?),
                    name: row.try_get("name").map_err(read)?,
                }))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), err)]
    async fn get_or_create(&self, name: &str) -> Result<Category, StoreError> {
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(CategoryId::new().as_uuid())
            .bind(name)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_category", e))?;

        // The row exists after the insert-if-absent, whoever won the race.
        self.find_by_name(name).await?.ok_or_else(|| {
            StoreError::Storage(format!("category '{name}' missing after upsert"))
        })
    }
}

/// Postgres-backed product store.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn fetch_filtered(
        &self,
        operation: &str,
        clause: &str,
        binds: &[&str],
    ) -> Result<Vec<Product>, StoreError> {
        let sql = format!("{SELECT_PRODUCT} WHERE {clause} ORDER BY p.id");
        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = query.bind(*bind);
        }
        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        rows.iter().map(row_to_product).collect()
    }
}

#[async_trait::async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self, product), fields(product_id = %product.id), err)]
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, brand, price_cents, inventory, description, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.price_cents)
        .bind(product.inventory)
        .bind(&product.description)
        .bind(product.category.id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_product", e))?;
        Ok(())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id), err)]
    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2,
                brand = $3,
                price_cents = $4,
                inventory = $5,
                description = $6,
                category_id = $7
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.price_cents)
        .bind(product.inventory)
        .bind(&product.description)
        .bind(product.category.id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let sql = format!("{SELECT_PRODUCT} WHERE p.id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_product_by_id", e))?;
        row.as_ref().map(row_to_product).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let sql = format!("{SELECT_PRODUCT} ORDER BY p.id");
        let rows = sqlx::query(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_products", e))?;
        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        self.fetch_filtered("find_products_by_category", "c.name = $1", &[category])
            .await
    }

    #[instrument(skip(self), err)]
    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Product>, StoreError> {
        self.fetch_filtered("find_products_by_brand", "p.brand = $1", &[brand])
            .await
    }

    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        self.fetch_filtered("find_products_by_name", "p.name = $1", &[name])
            .await
    }

    #[instrument(skip(self), err)]
    async fn find_by_category_and_brand(
        &self,
        category: &str,
        brand: &str,
    ) -> Result<Vec<Product>, StoreError> {
        self.fetch_filtered(
            "find_products_by_category_and_brand",
            "c.name = $1 AND p.brand = $2",
            &[category, brand],
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn find_by_brand_and_name(
        &self,
        brand: &str,
        name: &str,
    ) -> Result<Vec<Product>, StoreError> {
        self.fetch_filtered(
            "find_products_by_brand_and_name",
            "p.brand = $1 AND p.name = $2",
            &[brand, name],
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn count_by_brand_and_name(&self, brand: &str, name: &str) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM products WHERE brand = $1 AND name = $2")
            .bind(brand)
            .bind(name)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_products_by_brand_and_name", e))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| StoreError::Storage(format!("decode count row: {e}")))?;
        Ok(total as u64)
    }
}
