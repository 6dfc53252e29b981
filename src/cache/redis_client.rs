use anyhow::Result;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, error, info};

use super::{CacheConfig, KeyValueStore};
use crate::utils::errors::StorageError;

/// Cliente Redis con connection manager y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }

    /// Generar clave con prefijo
    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        match conn.get::<_, Option<String>>(&full_key).await {
            Ok(value) => {
                debug!("📥 Redis GET {}: {}", full_key, if value.is_some() { "HIT" } else { "MISS" });
                Ok(value)
            }
            Err(e) => {
                error!("❌ Error leyendo clave {}: {}", full_key, e);
                Err(StorageError::Backend(e.to_string()))
            }
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        let result: RedisResult<()> = conn.set(&full_key, value).await;

        match result {
            Ok(()) => {
                debug!("💾 Redis SET para clave: {}", full_key);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando clave {}: {}", full_key, e);
                Err(StorageError::Backend(e.to_string()))
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        let result: RedisResult<i64> = conn.del(&full_key).await;

        match result {
            Ok(count) => {
                debug!("🗑️ Redis DELETE para clave: {} (eliminados: {})", full_key, count);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error eliminando clave {}: {}", full_key, e);
                Err(StorageError::Backend(e.to_string()))
            }
        }
    }
}
