//! Order management infrastructure

pub mod service;

pub use service::{OrderService, OrderServiceTrait};
