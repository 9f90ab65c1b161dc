//! Notification inbox service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::{DomainError, Notification, NotificationId, User};

/// Inbox operations exposed to the API layer
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync + Debug {
    /// The user's notifications, newest first
    async fn list_for_user(
        &self,
        user: &User,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DomainError>;

    /// Flip the read flag on one of the user's notifications.
    ///
    /// Silently does nothing when the notification is missing or belongs
    /// to somebody else; a zero-document update is not an error.
    async fn mark_read(&self, user: &User, id: &NotificationId) -> Result<(), DomainError>;
}

#[derive(Debug)]
pub struct NotificationService {
    notifications: Arc<dyn Storage<Notification>>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn Storage<Notification>>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn list_for_user(
        &self,
        user: &User,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DomainError> {
        let notifications = self.notifications.list().await?;

        let mut notifications: Vec<Notification> = notifications
            .into_iter()
            .filter(|n| n.is_addressed_to(user.id()) && (!unread_only || !n.is_read()))
            .collect();

        notifications.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(notifications)
    }

    async fn mark_read(&self, user: &User, id: &NotificationId) -> Result<(), DomainError> {
        let Some(mut notification) = self
            .notifications
            .get(id)
            .await?
            .filter(|n| n.is_addressed_to(user.id()))
        else {
            return Ok(());
        };

        notification.mark_read();
        self.notifications.update(notification).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationKind;
    use crate::domain::user::{Role, UserId};
    use crate::infrastructure::storage::InMemoryStorage;

    fn user() -> User {
        User::new(
            UserId::generate(),
            "Asha",
            "asha@example.com",
            "hash",
            Role::Seller,
        )
    }

    fn service_with_storage() -> (NotificationService, Arc<InMemoryStorage<Notification>>) {
        let storage = Arc::new(InMemoryStorage::<Notification>::new());
        (NotificationService::new(storage.clone()), storage)
    }

    async fn seed(
        storage: &InMemoryStorage<Notification>,
        user: &User,
        message: &str,
    ) -> Notification {
        let notification =
            Notification::new(user.id().clone(), message, NotificationKind::Order);
        storage.create(notification.clone()).await.unwrap();
        notification
    }

    #[tokio::test]
    async fn test_list_only_own_notifications() {
        let (service, storage) = service_with_storage();
        let asha = user();
        let other = user();

        seed(&storage, &asha, "for asha").await;
        seed(&storage, &other, "for other").await;

        let inbox = service.list_for_user(&asha, false).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].message(), "for asha");
    }

    #[tokio::test]
    async fn test_unread_filter() {
        let (service, storage) = service_with_storage();
        let asha = user();

        let read = seed(&storage, &asha, "already seen").await;
        seed(&storage, &asha, "fresh").await;

        service.mark_read(&asha, read.id()).await.unwrap();

        let unread = service.list_for_user(&asha, true).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].message(), "fresh");

        let all = service.list_for_user(&asha, false).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_mark_read_foreign_notification_is_noop() {
        let (service, storage) = service_with_storage();
        let asha = user();
        let other = user();

        let theirs = seed(&storage, &other, "not yours").await;

        // No error, and the flag is untouched.
        service.mark_read(&asha, theirs.id()).await.unwrap();

        let stored = storage.get(theirs.id()).await.unwrap().unwrap();
        assert!(!stored.is_read());
    }

    #[tokio::test]
    async fn test_mark_read_missing_is_noop() {
        let (service, _) = service_with_storage();
        service
            .mark_read(&user(), &NotificationId::generate())
            .await
            .unwrap();
    }
}
