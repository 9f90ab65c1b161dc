//! Catalog infrastructure

pub mod service;

pub use service::{CatalogService, CatalogServiceTrait, CreateProductRequest, ProductFilter};
