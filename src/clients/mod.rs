//! Clients - HTTP Clients for External APIs
//!
//! Proveedores de distancias entre dos direcciones.

pub mod directions_client;

use async_trait::async_trait;

use crate::models::distance::DistanceLeg;
use crate::utils::errors::LookupError;

pub use directions_client::GoogleDirectionsClient;

/// Distancia de conducción entre dos direcciones
#[async_trait]
pub trait DistanceLookup: Send + Sync {
    async fn lookup(
        &self,
        origin: &str,
        destination: &str,
        avoid_expressways: bool,
    ) -> Result<DistanceLeg, LookupError>;
}
