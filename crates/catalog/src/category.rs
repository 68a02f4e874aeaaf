use serde::{Deserialize, Serialize};

use storefront_core::CategoryId;

/// Named grouping entity for products.
///
/// The name is the natural key: lookups and implicit creation both go by
/// name, and many products may reference one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
        }
    }
}
