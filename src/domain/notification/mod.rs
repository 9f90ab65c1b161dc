//! Notification domain

mod entity;

pub use entity::{Notification, NotificationId, NotificationKind};
