//! Notification infrastructure

pub mod service;

pub use service::{NotificationService, NotificationServiceTrait};
