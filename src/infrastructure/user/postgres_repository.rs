//! PostgreSQL user repository
//!
//! Users get real columns instead of a JSONB document because the password
//! hash is excluded from entity serialization and the email carries a
//! unique constraint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::domain::DomainError;
use crate::domain::user::{Role, User, UserId, UserRepository};

#[derive(Debug)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates the repository, ensuring the users table exists
    pub async fn new(pool: PgPool) -> Result<Self, DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(Self { pool })
    }

    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| DomainError::storage(format!("Failed to read user row: {}", e)))?;

        let id = UserId::new(id)
            .map_err(|e| DomainError::storage(format!("Stored user ID is invalid: {}", e)))?;
        let role = Role::parse(&role)
            .ok_or_else(|| DomainError::storage(format!("Stored role is invalid: '{}'", role)))?;

        Ok(User::restore(id, name, email, password_hash, role, created_at))
    }

    fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(
            err,
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
        )
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.role().to_string())
        .bind(user.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(e) if Self::is_unique_violation(&e) => Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                user.email()
            ))),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to insert user: {}",
                e
            ))),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<User>, DomainError> {
        let rows = match role {
            Some(role) => {
                sqlx::query("SELECT * FROM users WHERE role = $1 ORDER BY created_at")
                    .bind(role.to_string())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT * FROM users ORDER BY created_at")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(Self::row_to_user).collect()
    }
}
