//! Cache
//!
//! Este módulo contiene los almacenes clave-valor donde se guardan las
//! colecciones JSON: Redis en producción y memoria para desarrollo y tests.

pub mod cache_config;
pub mod memory_store;
pub mod redis_client;

use async_trait::async_trait;

use crate::utils::errors::StorageError;

pub use cache_config::CacheConfig;
pub use memory_store::MemoryStore;
pub use redis_client::RedisClient;

/// Operaciones de almacenamiento clave-valor sobre texto JSON
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
