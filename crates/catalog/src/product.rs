use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, ProductId};

use crate::category::Category;

/// Sellable item entity with pricing and inventory.
///
/// Prices are integer smallest-currency-unit amounts (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price_cents: i64,
    pub inventory: i32,
    pub description: String,
    pub category: Category,
}

impl Product {
    /// Build a new product from a validated draft and a resolved category.
    pub fn from_draft(draft: ProductDraft, category: Category) -> Self {
        Self {
            id: ProductId::new(),
            name: draft.name,
            brand: draft.brand,
            price_cents: draft.price_cents,
            inventory: draft.inventory,
            description: draft.description,
            category,
        }
    }
}

/// Create-request payload: all product fields, category referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub price_cents: i64,
    pub inventory: i32,
    pub description: String,
    pub category: String,
}

impl ProductDraft {
    /// Validate the draft before any store interaction.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.brand.trim().is_empty() {
            return Err(DomainError::validation("brand cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        if self.inventory < 0 {
            return Err(DomainError::validation("inventory cannot be negative"));
        }
        Ok(())
    }
}

/// Partial-update payload: `None` fields leave the existing value unchanged.
///
/// Category is carried here by name but resolved by the service layer
/// (updates must reference an existing category).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price_cents: Option<i64>,
    pub inventory: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ProductPatch {
    /// Validate the set fields against the same rules as [`ProductDraft`].
    ///
    /// Unset fields are fine by construction; a merge can only break an
    /// invariant through a field the patch actually carries.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
        }
        if let Some(brand) = &self.brand {
            if brand.trim().is_empty() {
                return Err(DomainError::validation("brand cannot be empty"));
            }
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(DomainError::validation("category cannot be empty"));
            }
        }
        if let Some(inventory) = self.inventory {
            if inventory < 0 {
                return Err(DomainError::validation("inventory cannot be negative"));
            }
        }
        Ok(())
    }

    /// Merge the scalar fields of this patch onto an existing product.
    ///
    /// The category field is intentionally not applied here: resolving a
    /// category name to a row is the service's job.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(brand) = &self.brand {
            product.brand = brand.clone();
        }
        if let Some(price_cents) = self.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(inventory) = self.inventory {
            product.inventory = inventory;
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
    }
}

/// Flat transfer representation of a product for the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price_cents: i64,
    pub inventory: i32,
    pub description: String,
    pub category: String,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            brand: product.brand,
            price_cents: product.price_cents,
            inventory: product.inventory,
            description: product.description,
            category: product.category.name,
        }
    }
}
