//! Products domain module.
//!
//! This crate contains the product record and its input rules, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;
pub mod validation;

pub use product::{Product, ProductFields, ProductInput};
pub use validation::{
    CATEGORY_MAX_CHARS, COLOR_MAX_CHARS, PRODUCT_NAME_MAX_CHARS, ValidationErrors,
};
