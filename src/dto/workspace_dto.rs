use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::workspace::Workspace;
use crate::utils::validation::{validate_not_empty, WORKSPACE_ID_RE};

// Request para crear un espacio de trabajo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    #[validate(regex = "WORKSPACE_ID_RE")]
    pub id: String,

    #[validate(custom = "validate_not_empty", length(max = 50))]
    pub name: String,

    #[serde(default)]
    pub make_current: bool,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceListResponse {
    pub current: Option<String>,
    pub workspaces: Vec<Workspace>,
}

// Ajustes editables; la clave de API es opcional
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub home_address: Option<String>,
    pub api_key: Option<String>,
}

// Entrada de la caché de geocodificación
#[derive(Debug, Deserialize, Validate)]
pub struct GeoCacheRequest {
    #[validate(custom = "validate_not_empty")]
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}
