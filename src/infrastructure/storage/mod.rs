//! Storage backends

pub mod factory;
pub mod in_memory;
pub mod postgres;

pub use factory::{StorageBackend, StorageConfig, StorageFactory, collections};
pub use in_memory::InMemoryStorage;
pub use postgres::{PostgresConfig, PostgresStorage};
