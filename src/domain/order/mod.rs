//! Order domain

mod entity;

pub use entity::{Order, OrderId, OrderStatus};
