use serde::Deserialize;

use storefront_catalog::{ProductDraft, ProductPatch};

// -------------------------
// Request DTOs
// -------------------------

/// Category reference by name, as nested in product payloads.
#[derive(Debug, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub name: String,
    pub brand: String,
    pub price_cents: i64,
    pub inventory: i32,
    #[serde(default)]
    pub description: String,
    pub category: CategoryRef,
}

impl From<AddProductRequest> for ProductDraft {
    fn from(req: AddProductRequest) -> Self {
        Self {
            name: req.name,
            brand: req.brand,
            price_cents: req.price_cents,
            inventory: req.inventory,
            description: req.description,
            category: req.category.name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price_cents: Option<i64>,
    pub inventory: Option<i32>,
    pub description: Option<String>,
    pub category: Option<CategoryRef>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            brand: req.brand,
            price_cents: req.price_cents,
            inventory: req.inventory,
            description: req.description,
            category: req.category.map(|c| c.name),
        }
    }
}

// -------------------------
// Query DTOs (parameter names preserved from the public API)
// -------------------------

#[derive(Debug, Deserialize)]
pub struct BrandAndNameQuery {
    #[serde(rename = "brandName")]
    pub brand_name: String,
    #[serde(rename = "productName")]
    pub product_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryAndBrandQuery {
    pub category: String,
    #[serde(rename = "brandName")]
    pub brand_name: String,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct BrandQuery {
    pub brand: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub brand: String,
    pub name: String,
}
