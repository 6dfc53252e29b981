//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores de importación de tablas de clientes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("No company or address column found; the header row must contain a company name or address column")]
    ColumnDetection,

    #[error("No data rows found; a header row plus at least one data row is required")]
    NoData,
}

/// Errores fatales del cálculo de distancia de una ruta
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteDistanceError {
    #[error("Route '{0}' not found")]
    RouteNotFound(String),

    #[error("Route '{0}' has no members")]
    NoMembers(String),

    #[error("No home address configured; set the starting point in settings")]
    MissingHomeAddress,
}

/// Error de un tramo individual devuelto por el proveedor de distancias
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Directions API error: {0}")]
    Provider(String),

    #[error("Directions request failed: {0}")]
    Transport(String),
}

/// Errores del almacenamiento clave-valor
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored data for key '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No current workspace")]
    NoWorkspace,
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Distance error: {0}")]
    Distance(#[from] RouteDistanceError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Import(e) => {
                tracing::warn!("📄 Import error: {}", e);
                let code = match e {
                    ImportError::ColumnDetection => "COLUMN_DETECTION_ERROR",
                    ImportError::NoData => "NO_DATA",
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Import Error".to_string(),
                        message: e.to_string(),
                        details: None,
                        code: Some(code.to_string()),
                    },
                )
            }

            AppError::Distance(e) => {
                tracing::warn!("📏 Distance error: {}", e);
                let (status, code) = match e {
                    RouteDistanceError::RouteNotFound(_) => (StatusCode::NOT_FOUND, "ROUTE_NOT_FOUND"),
                    RouteDistanceError::NoMembers(_) => (StatusCode::UNPROCESSABLE_ENTITY, "NO_MEMBERS"),
                    RouteDistanceError::MissingHomeAddress => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_HOME_ADDRESS")
                    }
                };
                (
                    status,
                    ErrorResponse {
                        error: "Distance Error".to_string(),
                        message: e.to_string(),
                        details: None,
                        code: Some(code.to_string()),
                    },
                )
            }

            AppError::Storage(e) => {
                tracing::error!("💾 Storage error: {}", e);
                let status = match e {
                    StorageError::NoWorkspace => StatusCode::CONFLICT,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (
                    status,
                    ErrorResponse {
                        error: "Storage Error".to_string(),
                        message: "An error occurred while accessing local storage".to_string(),
                        details: Some(json!({ "storage_error": e.to_string() })),
                        code: Some("STORAGE_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                tracing::warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
