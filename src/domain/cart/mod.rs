//! Cart domain

mod entity;

pub use entity::{Cart, CartLine};
