//! In-memory storage implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::storage::{Storage, StorageEntity, StorageKey};

/// Thread-safe in-memory collection
///
/// Backs tests and local development. Data is lost when the process
/// terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty collection
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a collection pre-populated with entities
    #[cfg(test)]
    pub fn with_entities(entities: Vec<E>) -> Self {
        let storage = Self::new();
        {
            let mut map = storage.entities.write().unwrap();

            for entity in entities {
                map.insert(entity.key().as_str().to_string(), entity);
            }
        }
        storage
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entities.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if !entities.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(entities.remove(key.as_str()).is_some())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        entities.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{DEFAULT_PRODUCT_IMAGE, Product, ProductId};
    use crate::domain::user::UserId;

    fn test_product(name: &str) -> Product {
        Product::new(
            ProductId::generate(),
            name,
            "",
            100.0,
            "Jammu",
            "handloom",
            UserId::generate(),
            "Asha",
            DEFAULT_PRODUCT_IMAGE,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage = InMemoryStorage::<Product>::new();
        let product = test_product("Shawl");

        storage.create(product.clone()).await.unwrap();

        let retrieved = storage.get(product.id()).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().name(), "Shawl");
    }

    #[tokio::test]
    async fn test_duplicate_create_fails() {
        let storage = InMemoryStorage::<Product>::new();
        let product = test_product("Shawl");

        storage.create(product.clone()).await.unwrap();
        let result = storage.create(product).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let storage = InMemoryStorage::<Product>::new();
        let result = storage.update(test_product("Basket")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_save_upserts() {
        let storage = InMemoryStorage::<Product>::new();
        let product = test_product("Basket");

        storage.save(product.clone()).await.unwrap();
        storage.save(product.clone()).await.unwrap();

        assert_eq!(storage.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let storage = InMemoryStorage::<Product>::new();
        let product = test_product("Basket");

        storage.create(product.clone()).await.unwrap();
        assert!(storage.delete(product.id()).await.unwrap());
        assert!(!storage.delete(product.id()).await.unwrap());
        assert!(!storage.exists(product.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_and_clear() {
        let storage = InMemoryStorage::<Product>::with_entities(vec![
            test_product("A"),
            test_product("B"),
        ]);

        assert_eq!(storage.list().await.unwrap().len(), 2);

        storage.clear().await.unwrap();
        assert_eq!(storage.count().await.unwrap(), 0);
    }
}
