//! Catalog domain module.
//!
//! This crate contains the product/category entities and the deterministic
//! logic around them (validation, partial-update merges, DTO projection).
//! No IO, no HTTP, no storage.

pub mod category;
pub mod product;

pub use category::Category;
pub use product::{Product, ProductDraft, ProductDto, ProductPatch};
