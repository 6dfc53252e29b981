use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::distance::RouteDistanceResult;
use crate::models::segment::{RoadTypeMode, SegmentChoices};
use crate::utils::validation::{validate_not_empty, HEX_COLOR_RE};

// Request para renombrar o cambiar el color de una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRouteRequest {
    #[validate(custom = "validate_not_empty", length(max = 40))]
    pub name: Option<String>,

    #[validate(regex = "HEX_COLOR_RE")]
    pub color: Option<String>,
}

// Orden completo de visita
#[derive(Debug, Deserialize)]
pub struct ReplaceOrderRequest {
    pub order: Vec<String>,
}

// Posición de un cliente (base 1, acotada); `null` lo quita del orden
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPositionRequest {
    pub customer_id: String,
    #[serde(default)]
    pub position: Option<i64>,
}

// Elecciones de tipo de vía de una ruta
#[derive(Debug, Deserialize)]
pub struct SaveSegmentsRequest {
    pub segments: SegmentChoices,
}

// Query del cálculo de distancia
#[derive(Debug, Default, Deserialize)]
pub struct DistanceQuery {
    #[serde(default)]
    pub mode: RoadTypeMode,
}

// Response del cálculo de distancia
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDistanceResponse {
    pub route_id: String,
    #[serde(flatten)]
    pub result: RouteDistanceResult,
}
