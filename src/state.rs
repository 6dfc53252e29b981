//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::cache::KeyValueStore;
use crate::clients::DistanceLookup;
use crate::config::environment::EnvironmentConfig;
use crate::repositories::data_repository::DataRepository;
use crate::services::route_distance_service::RouteDistanceService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub repository: DataRepository,
    pub distance: Arc<RouteDistanceService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn KeyValueStore>, lookup: Arc<dyn DistanceLookup>) -> Self {
        let distance = RouteDistanceService::new(lookup, config.distance_call_delay);
        Self {
            config,
            repository: DataRepository::new(store),
            distance: Arc::new(distance),
        }
    }
}
