//! Modelo de tramos
//!
//! Un tramo es el trayecto dirigido entre dos paradas consecutivas. La
//! elección de tipo de vía se guarda por ruta con la clave `desde_hasta`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Id de la parada de salida desde casa
pub const HOME_START_ID: &str = "home_start";
/// Id de la parada de regreso a casa
pub const HOME_END_ID: &str = "home_end";

/// Tipo de vía de un tramo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoadType {
    /// Vía general (se evitan autopistas)
    #[default]
    General,
    /// Autopista permitida
    Highway,
}

/// Política de elección de autopista para el cálculo de una ruta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoadTypeMode {
    General,
    Highway,
    #[default]
    Segment,
}

impl RoadTypeMode {
    /// Tipo de vía efectivo de un tramo según el modo
    pub fn resolve(self, key: &SegmentKey, choices: &SegmentChoices) -> RoadType {
        match self {
            RoadTypeMode::General => RoadType::General,
            RoadTypeMode::Highway => RoadType::Highway,
            RoadTypeMode::Segment => choices.get(key),
        }
    }
}

/// Clave compuesta de un tramo: par ordenado de ids de parada.
///
/// Se serializa como `from + "_" + to`. Si algún id contiene `_` dos pares
/// distintos pueden producir la misma clave; las claves sólo se construyen,
/// nunca se vuelven a separar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    pub from: String,
    pub to: String,
}

impl SegmentKey {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.from, self.to)
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.from, self.to)
    }
}

/// Elecciones de tipo de vía de una ruta, indexadas por clave serializada
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct SegmentChoices(BTreeMap<String, RoadType>);

impl SegmentChoices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tipo guardado para el tramo, `General` si no hay entrada
    pub fn get(&self, key: &SegmentKey) -> RoadType {
        self.0.get(&key.storage_key()).copied().unwrap_or_default()
    }

    pub fn set(&mut self, key: &SegmentKey, road_type: RoadType) {
        self.0.insert(key.storage_key(), road_type);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SegmentKey, RoadType)> for SegmentChoices {
    fn from_iter<I: IntoIterator<Item = (SegmentKey, RoadType)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, road_type)| (key.storage_key(), road_type)).collect())
    }
}

/// Mapa persistido `{ routeId: { "from_to": tipo } }`
pub type SegmentMap = BTreeMap<String, SegmentChoices>;

/// Parada de una ruta (casa o cliente)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub id: String,
    pub address: String,
    pub label: String,
}

/// Tramo listado en el diálogo de elección de vía
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPlanEntry {
    pub key: String,
    pub from_label: String,
    pub to_label: String,
    pub road_type: RoadType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_key_is_directional() {
        let forward = SegmentKey::new("home_start", "c1");
        let backward = SegmentKey::new("c1", "home_start");
        assert_eq!(forward.storage_key(), "home_start_c1");
        assert_ne!(forward.storage_key(), backward.storage_key());

        let mut choices = SegmentChoices::new();
        choices.set(&forward, RoadType::Highway);
        assert_eq!(choices.get(&forward), RoadType::Highway);
        assert_eq!(choices.get(&backward), RoadType::General);
    }

    #[test]
    fn test_mode_resolution() {
        let key = SegmentKey::new("a", "b");
        let choices: SegmentChoices = [(key.clone(), RoadType::Highway)].into_iter().collect();
        assert_eq!(RoadTypeMode::General.resolve(&key, &choices), RoadType::General);
        assert_eq!(RoadTypeMode::Highway.resolve(&key, &SegmentChoices::new()), RoadType::Highway);
        assert_eq!(RoadTypeMode::Segment.resolve(&key, &choices), RoadType::Highway);
        assert_eq!(RoadTypeMode::default(), RoadTypeMode::Segment);
    }

    #[test]
    fn test_segment_map_json_shape() {
        let json = r#"{"route_1":{"home_start_c1":"highway","c1_home_end":"general"}}"#;
        let map: SegmentMap = serde_json::from_str(json).unwrap();
        let choices = &map["route_1"];
        assert_eq!(choices.get(&SegmentKey::new("home_start", "c1")), RoadType::Highway);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"route_1":{"c1_home_end":"general","home_start_c1":"highway"}}"#);
    }
}
