//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables son opcionales y tienen valores por defecto.

use std::env;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    /// Sin Redis se usa el almacén en memoria
    pub redis_url: Option<String>,
    pub google_maps_api_key: Option<String>,
    pub distance_call_delay: Duration,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            redis_url: None,
            google_maps_api_key: None,
            distance_call_delay: Duration::from_millis(500),
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl EnvironmentConfig {
    /// Lee la configuración del entorno; los valores inválidos se sustituyen
    /// por el valor por defecto.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            environment: non_empty("ENVIRONMENT").unwrap_or(defaults.environment),
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            host: non_empty("HOST").unwrap_or(defaults.host),
            cors_origins: non_empty("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            redis_url: non_empty("REDIS_URL"),
            google_maps_api_key: non_empty("GOOGLE_MAPS_API_KEY"),
            distance_call_delay: non_empty("DISTANCE_CALL_DELAY_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.distance_call_delay),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuración de Redis, si hay URL
    pub fn cache_config(&self) -> Option<CacheConfig> {
        self.redis_url.as_ref().map(|url| CacheConfig {
            redis_url: url.clone(),
            ..CacheConfig::default()
        })
    }
}
