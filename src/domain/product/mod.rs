//! Product domain

mod entity;

pub use entity::{DEFAULT_PRODUCT_IMAGE, Product, ProductId, ProductPatch};
