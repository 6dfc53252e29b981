//! Modelo de Workspace
//!
//! Un espacio de trabajo (normalmente uno por mes) aísla clientes, rutas,
//! tramos y borradores de gastos. La caché de geocodificación y los ajustes
//! son compartidos.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Registro persistido de espacios de trabajo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRegistry {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

impl WorkspaceRegistry {
    pub fn contains(&self, id: &str) -> bool {
        self.workspaces.iter().any(|w| w.id == id)
    }

    /// Quita un espacio; si era el actual promueve el creado más
    /// recientemente, o ninguno si no quedan.
    pub fn remove(&mut self, id: &str) -> Option<Workspace> {
        let index = self.workspaces.iter().position(|w| w.id == id)?;
        let removed = self.workspaces.remove(index);
        if self.current.as_deref() == Some(id) {
            self.current = self
                .workspaces
                .iter()
                .max_by_key(|w| w.created_at)
                .map(|w| w.id.clone());
        }
        Some(removed)
    }
}

/// Id y nombre del espacio mensual para una fecha (`2025-03`, `2025年3月`)
pub fn monthly_workspace(now: DateTime<Utc>) -> (String, String) {
    (
        format!("{:04}-{:02}", now.year(), now.month()),
        format!("{}年{}月", now.year(), now.month()),
    )
}

/// Ajustes globales compartidos entre espacios
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub home_address: String,
    #[serde(default)]
    pub api_key: String,
}

/// Coordenadas cacheadas de una dirección
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Caché de geocodificación compartida: dirección -> coordenadas
pub type GeoCache = BTreeMap<String, LatLng>;
