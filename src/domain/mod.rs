//! Domain layer
//!
//! Entities, validation, and the traits the infrastructure layer
//! implements. No I/O happens here.

pub mod assist;
pub mod cart;
pub mod error;
pub mod job;
pub mod notification;
pub mod order;
pub mod product;
pub mod storage;
pub mod user;

pub use error::DomainError;

pub use cart::{Cart, CartLine};
pub use job::{JobId, JobPosting};
pub use notification::{Notification, NotificationId, NotificationKind};
pub use order::{Order, OrderId, OrderStatus};
pub use product::{DEFAULT_PRODUCT_IMAGE, Product, ProductId, ProductPatch};
pub use user::{Role, User, UserId};
