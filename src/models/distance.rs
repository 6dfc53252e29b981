//! Resultado del cálculo de distancia de una ruta

use serde::{Deserialize, Serialize};

use super::segment::{RoadType, RoadTypeMode};

/// Marca de duración de un tramo cuyo cálculo falló
pub const FAILED_SEGMENT_DURATION: &str = "計算失敗";

/// Respuesta del proveedor de distancias para un tramo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceLeg {
    pub distance_km: f64,
    pub duration_text: String,
}

/// Un tramo del resultado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDistance {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub road_type: RoadType,
    pub km: f64,
    pub duration: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDistanceResult {
    pub total_km: f64,
    pub highway_km: f64,
    pub general_km: f64,
    pub segments: Vec<SegmentDistance>,
    pub road_type_mode: RoadTypeMode,
}

impl RouteDistanceResult {
    /// Número de tramos cuyo cálculo falló
    pub fn failed_segments(&self) -> usize {
        self.segments.iter().filter(|s| s.error).count()
    }
}
