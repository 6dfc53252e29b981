//! Modelo de Route
//!
//! Este módulo contiene el struct Route y el conjunto fijo de rutas por
//! defecto que se crea con cada espacio de trabajo. El JSON persistido
//! tiene la forma `{id, name, color, order: [ids...]}`.

use serde::{Deserialize, Serialize};

/// Ruta con nombre, color y orden de visita explícito
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub order: Vec<String>,
}

/// Colores por defecto de route_1..route_10
const DEFAULT_ROUTE_COLORS: [&str; 10] = [
    "#4285f4", "#ea4335", "#34a853", "#ff9800", "#9c27b0",
    "#00acc1", "#795548", "#e91e63", "#607d8b", "#cddc39",
];

/// Número de rutas del conjunto fijo
pub const ROUTE_COUNT: usize = DEFAULT_ROUTE_COLORS.len();

impl Route {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            order: Vec::new(),
        }
    }
}

/// Conjunto fijo de rutas creado al abrir un espacio de trabajo
pub fn default_routes() -> Vec<Route> {
    DEFAULT_ROUTE_COLORS
        .iter()
        .enumerate()
        .map(|(index, color)| {
            let number = index + 1;
            Route::new(format!("route_{}", number), format!("ルート{}", number), *color)
        })
        .collect()
}

/// Busca una ruta por id
pub fn find_route<'a>(routes: &'a [Route], route_id: &str) -> Option<&'a Route> {
    routes.iter().find(|route| route.id == route_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let routes = default_routes();
        assert_eq!(routes.len(), ROUTE_COUNT);
        assert_eq!(routes[0].id, "route_1");
        assert_eq!(routes[0].color, "#4285f4");
        assert_eq!(routes[9].id, "route_10");
        assert!(routes.iter().all(|r| r.order.is_empty()));
    }

    #[test]
    fn test_route_json_shape() {
        let mut route = Route::new("route_1", "ルート1", "#4285f4");
        route.order = vec!["c2".into(), "c1".into()];
        let value = serde_json::to_value(&route).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "route_1", "name": "ルート1", "color": "#4285f4", "order": ["c2", "c1"]})
        );
    }

    #[test]
    fn test_missing_order_defaults_to_empty() {
        let route: Route = serde_json::from_str(r##"{"id":"route_3","name":"R3","color":"#34a853"}"##).unwrap();
        assert!(route.order.is_empty());
        assert!(find_route(&[route], "route_3").is_some());
    }
}
