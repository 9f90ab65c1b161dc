//! User service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::user::{
    Role, User, UserId, UserRepository, validate_email, validate_name, validate_password,
};
use crate::infrastructure::user::password::PasswordHasher;

/// Request to register a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Identity operations exposed to the API layer
#[async_trait]
pub trait UserServiceTrait: Send + Sync + Debug {
    /// Register a new user; fails with a conflict when the email is taken
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError>;

    /// Verify credentials and return the matching user
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError>;

    /// Fetch a user by ID
    async fn get(&self, id: &UserId) -> Result<User, DomainError>;
}

/// User service implementation
#[derive(Debug)]
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    pub fn new(repository: Arc<R>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl<R> UserServiceTrait for UserService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        let email = request.email.trim().to_lowercase();

        if self.repository.email_exists(&email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(
            UserId::generate(),
            request.name.trim(),
            email,
            password_hash,
            request.role,
        );

        // The repository enforces uniqueness again under its own lock, so
        // the pre-check above only exists for a friendlier error path.
        let user = self.repository.create(user).await?;

        tracing::info!(user_id = %user.id(), role = %user.role(), "Registered new user");

        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repository
            .get_by_email(email.trim())
            .await?
            .ok_or_else(|| DomainError::authorization("Invalid email or password"))?;

        if !self.hasher.verify(password, user.password_hash())? {
            return Err(DomainError::authorization("Invalid email or password"));
        }

        Ok(user)
    }

    async fn get(&self, id: &UserId) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::password::mock::PlainHasher;

    fn service() -> UserService<MockUserRepository> {
        UserService::new(Arc::new(MockUserRepository::new()), Arc::new(PlainHasher))
    }

    fn register_request(email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            name: "Asha Devi".to_string(),
            email: email.to_string(),
            password: "a-long-password".to_string(),
            role: Role::Seller,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service();
        let user = service
            .register(register_request("asha@example.com"))
            .await
            .unwrap();

        assert_ne!(user.password_hash(), "a-long-password");
        assert_eq!(user.email(), "asha@example.com");
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let service = service();
        let user = service
            .register(register_request("  Asha@Example.COM  "))
            .await
            .unwrap();

        assert_eq!(user.email(), "asha@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = service();
        service
            .register(register_request("dup@example.com"))
            .await
            .unwrap();

        let result = service.register(register_request("dup@example.com")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let service = service();
        let mut request = register_request("x@example.com");
        request.password = "short".to_string();

        let result = service.register(request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let service = service();
        let registered = service
            .register(register_request("asha@example.com"))
            .await
            .unwrap();

        let user = service
            .authenticate("asha@example.com", "a-long-password")
            .await
            .unwrap();
        assert_eq!(user.id(), registered.id());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = service();
        service
            .register(register_request("asha@example.com"))
            .await
            .unwrap();

        let result = service.authenticate("asha@example.com", "wrong").await;
        assert!(matches!(result, Err(DomainError::Authorization { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let service = service();
        let result = service.authenticate("ghost@example.com", "whatever").await;
        assert!(matches!(result, Err(DomainError::Authorization { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let service = service();
        let result = service.get(&UserId::generate()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
