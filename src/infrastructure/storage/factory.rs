//! Storage factory
//!
//! Opens a typed collection on whichever backend the configuration
//! selects. The marketplace keeps one collection per entity kind.

use std::sync::Arc;

use serde::Deserialize;
use sqlx::PgPool;

use crate::domain::DomainError;
use crate::domain::storage::{Storage, StorageEntity};
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use crate::infrastructure::storage::postgres::{PostgresConfig, PostgresStorage};

/// Collection names used by the marketplace
pub mod collections {
    pub const USERS: &str = "users";
    pub const PRODUCTS: &str = "products";
    pub const CARTS: &str = "carts";
    pub const ORDERS: &str = "orders";
    pub const JOBS: &str = "jobs";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Which storage backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Required when `backend` is `postgres`
    pub postgres: Option<PostgresConfig>,
}

/// Creates collections on the configured backend
///
/// Holds the connection pool so every collection shares it.
#[derive(Debug)]
pub struct StorageFactory {
    backend: StorageBackend,
    pool: Option<PgPool>,
}

impl StorageFactory {
    /// Connects to the configured backend
    pub async fn new(config: &StorageConfig) -> Result<Self, DomainError> {
        let pool = match config.backend {
            StorageBackend::InMemory => None,
            StorageBackend::Postgres => {
                let pg = config.postgres.as_ref().ok_or_else(|| {
                    DomainError::storage(
                        "Storage backend is 'postgres' but no postgres configuration was provided",
                    )
                })?;

                Some(pg.connect().await?)
            }
        };

        Ok(Self {
            backend: config.backend,
            pool,
        })
    }

    /// Creates an in-memory factory, regardless of configuration
    pub fn in_memory() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            pool: None,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    /// The shared connection pool, when the backend is PostgreSQL
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Opens the named collection for entity type `E`
    pub async fn open<E>(&self, collection: &str) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match self.backend {
            StorageBackend::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            StorageBackend::Postgres => {
                let pool = self
                    .pool
                    .as_ref()
                    .ok_or_else(|| DomainError::storage("PostgreSQL pool not initialized"))?
                    .clone();

                Ok(Arc::new(PostgresStorage::<E>::new(pool, collection).await?))
            }
        }
    }

    /// Opens the named collection and ensures a text index over `fields`
    pub async fn open_searchable<E>(
        &self,
        collection: &str,
        fields: &[&str],
    ) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match self.backend {
            StorageBackend::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            StorageBackend::Postgres => {
                let pool = self
                    .pool
                    .as_ref()
                    .ok_or_else(|| DomainError::storage("PostgreSQL pool not initialized"))?
                    .clone();

                let storage = PostgresStorage::<E>::new(pool, collection).await?;
                storage.ensure_text_index(fields).await?;

                Ok(Arc::new(storage))
            }
        }
    }
}
