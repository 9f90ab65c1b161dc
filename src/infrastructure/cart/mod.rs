//! Cart and checkout infrastructure

pub mod service;

pub use service::{CartService, CartServiceTrait};
