//! Notification entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::order::OrderId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Notification identifier - UUID string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.is_empty() || id.len() > 64 {
            return Err(DomainError::invalid_id(
                "Notification ID must be a non-empty string of at most 64 characters",
            ));
        }

        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NotificationId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NotificationId> for String {
    fn from(id: NotificationId) -> Self {
        id.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for NotificationId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Category tag for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Order,
    System,
}

/// A message in a user's inbox
///
/// Created by system actions (checkout, direct orders); the only mutation is
/// the read flag, flipped by the owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    user_id: UserId,
    message: String,
    kind: NotificationKind,
    read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order_id: Option<OrderId>,
    created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: UserId, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: NotificationId::generate(),
            user_id,
            message: message.into(),
            kind,
            read: false,
            order_id: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the order this notification refers to
    pub fn with_order(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_addressed_to(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

impl StorageEntity for Notification {
    type Key = NotificationId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_starts_unread() {
        let n = Notification::new(UserId::generate(), "New order", NotificationKind::Order);
        assert!(!n.is_read());
        assert!(n.order_id().is_none());
    }

    #[test]
    fn test_with_order() {
        let order_id = OrderId::generate();
        let n = Notification::new(UserId::generate(), "New order", NotificationKind::Order)
            .with_order(order_id.clone());
        assert_eq!(n.order_id(), Some(&order_id));
    }

    #[test]
    fn test_mark_read() {
        let mut n = Notification::new(UserId::generate(), "hi", NotificationKind::System);
        n.mark_read();
        assert!(n.is_read());
    }

    #[test]
    fn test_addressing() {
        let user = UserId::generate();
        let n = Notification::new(user.clone(), "hi", NotificationKind::Order);
        assert!(n.is_addressed_to(&user));
        assert!(!n.is_addressed_to(&UserId::generate()));
    }
}
