//! Servicio de distancia de ruta
//!
//! Calcula la distancia de conducción de una ruta completa
//! (casa → miembros en orden de visita → casa) tramo a tramo, separando
//! kilómetros de autopista y de vía general. Las consultas al proveedor son
//! estrictamente secuenciales con una pausa fija entre llamadas; un tramo
//! fallido se marca y el cálculo continúa.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::clients::DistanceLookup;
use crate::models::customer::CustomerRecord;
use crate::models::distance::{RouteDistanceResult, SegmentDistance, FAILED_SEGMENT_DURATION};
use crate::models::route::{find_route, Route};
use crate::models::segment::{RoadType, RoadTypeMode, SegmentChoices, SegmentKey};
use crate::repositories::data_repository::DataRepository;
use crate::services::route_order_service::{resolve_visit_order, route_members};
use crate::services::segment_service::{build_stops, LABEL_MAX_CHARS};
use crate::utils::address::truncate_label;
use crate::utils::errors::{AppResult, RouteDistanceError};

/// Pausa por defecto entre consultas al proveedor
pub const DEFAULT_CALL_DELAY: Duration = Duration::from_millis(500);

pub struct RouteDistanceService {
    lookup: Arc<dyn DistanceLookup>,
    call_delay: Duration,
    gate: Mutex<()>,
}

impl RouteDistanceService {
    pub fn new(lookup: Arc<dyn DistanceLookup>, call_delay: Duration) -> Self {
        Self {
            lookup,
            call_delay,
            gate: Mutex::new(()),
        }
    }

    /// Calcula la distancia de una ruta a partir de datos ya cargados.
    ///
    /// Las precondiciones se comprueban en orden (ruta, miembros, casa)
    /// antes de cualquier consulta.
    pub async fn compute_route_distance(
        &self,
        routes: &[Route],
        route_id: &str,
        customers: &[CustomerRecord],
        home_address: &str,
        mode: RoadTypeMode,
        choices: &SegmentChoices,
    ) -> Result<RouteDistanceResult, RouteDistanceError> {
        let route = find_route(routes, route_id)
            .ok_or_else(|| RouteDistanceError::RouteNotFound(route_id.to_string()))?;

        let members = route_members(customers, route_id);
        if members.is_empty() {
            return Err(RouteDistanceError::NoMembers(route_id.to_string()));
        }

        if home_address.trim().is_empty() {
            return Err(RouteDistanceError::MissingHomeAddress);
        }

        let visit = resolve_visit_order(route, &members);
        let stops = build_stops(home_address, &visit);

        // Un solo cálculo contra el proveedor a la vez
        let _gate = self.gate.lock().await;

        info!("📏 Calculando distancia de {} ({} tramos, modo {:?})", route_id, stops.len() - 1, mode);

        let mut segments = Vec::with_capacity(stops.len() - 1);
        let mut highway_km = 0.0;
        let mut general_km = 0.0;

        for (index, pair) in stops.windows(2).enumerate() {
            let (from, to) = (&pair[0], &pair[1]);
            let key = SegmentKey::new(from.id.clone(), to.id.clone());
            let road_type = mode.resolve(&key, choices);

            if index > 0 && !self.call_delay.is_zero() {
                tokio::time::sleep(self.call_delay).await;
            }

            let from_label = truncate_label(&from.address, LABEL_MAX_CHARS);
            let to_label = truncate_label(&to.address, LABEL_MAX_CHARS);

            match self
                .lookup
                .lookup(&from.address, &to.address, road_type == RoadType::General)
                .await
            {
                Ok(leg) => {
                    match road_type {
                        RoadType::Highway => highway_km += leg.distance_km,
                        RoadType::General => general_km += leg.distance_km,
                    }
                    segments.push(SegmentDistance {
                        from: from_label,
                        to: to_label,
                        road_type,
                        km: leg.distance_km,
                        duration: leg.duration_text,
                        error: false,
                    });
                }
                Err(e) => {
                    warn!("⚠️ Tramo {} sin distancia: {}", key, e);
                    segments.push(SegmentDistance {
                        from: from_label,
                        to: to_label,
                        road_type,
                        km: 0.0,
                        duration: FAILED_SEGMENT_DURATION.to_string(),
                        error: true,
                    });
                }
            }
        }

        let result = RouteDistanceResult {
            total_km: highway_km + general_km,
            highway_km,
            general_km,
            segments,
            road_type_mode: mode,
        };

        info!(
            "✅ Distancia de {}: {} km (autopista {}, general {}, fallidos {})",
            route_id,
            result.total_km,
            result.highway_km,
            result.general_km,
            result.failed_segments()
        );
        Ok(result)
    }

    /// Calcula la distancia de una ruta del espacio actual
    pub async fn route_distance(
        &self,
        repository: &DataRepository,
        route_id: &str,
        mode: RoadTypeMode,
    ) -> AppResult<RouteDistanceResult> {
        let routes = repository.routes().await?;
        let customers = repository.customers().await?;
        let settings = repository.settings().await?;
        let choices = repository.route_segments(route_id).await?;

        Ok(self
            .compute_route_distance(&routes, route_id, &customers, &settings.home_address, mode, &choices)
            .await?)
    }
}
