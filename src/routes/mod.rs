//! Rutas HTTP
//!
//! Routers de axum por recurso y el router completo de la aplicación.

pub mod customer_routes;
pub mod route_routes;
pub mod workspace_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Router completo con CORS según la configuración
pub fn create_app(state: AppState) -> Router {
    let cors: CorsLayer = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api/workspaces", workspace_routes::create_workspace_router())
        .nest("/api/customers", customer_routes::create_customer_router())
        .nest("/api/routes", route_routes::create_route_router())
        .merge(workspace_routes::create_storage_router())
        .layer(cors)
        .with_state(state)
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "maintenance_map",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
