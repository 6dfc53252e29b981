use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};

use crate::controllers::workspace_controller::WorkspaceController;
use crate::dto::workspace_dto::{
    CreateWorkspaceRequest, GeoCacheRequest, UpdateSettingsRequest, WorkspaceListResponse,
};
use crate::dto::ApiResponse;
use crate::models::workspace::{GeoCache, LatLng, Settings, Workspace};
use crate::repositories::Backup;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_workspace_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workspaces).post(create_workspace))
        .route("/current/reset", post(reset_workspace))
        .route("/:id/activate", post(activate_workspace))
        .route("/:id", delete(delete_workspace))
}

/// Datos compartidos y de respaldo
pub fn create_storage_router() -> Router<AppState> {
    Router::new()
        .route("/api/settings", get(get_settings).put(update_settings))
        .route("/api/geocache", get(get_geo_cache).put(set_geo_cache))
        .route("/api/expense-drafts", get(get_expense_drafts).put(save_expense_drafts))
        .route("/api/backup", get(export_backup).post(import_backup))
}

fn controller(state: &AppState) -> WorkspaceController {
    WorkspaceController::new(state.repository.clone())
}

async fn list_workspaces(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WorkspaceListResponse>>, AppError> {
    Ok(Json(controller(&state).list().await?))
}

async fn create_workspace(
    State(state): State<AppState>,
    Json(request): Json<CreateWorkspaceRequest>,
) -> Result<Json<ApiResponse<Workspace>>, AppError> {
    Ok(Json(controller(&state).create(request).await?))
}

async fn activate_workspace(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    Ok(Json(controller(&state).activate(&id).await?))
}

async fn delete_workspace(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Option<String>>>, AppError> {
    Ok(Json(controller(&state).delete(&id).await?))
}

async fn reset_workspace(State(state): State<AppState>) -> Result<Json<ApiResponse<String>>, AppError> {
    Ok(Json(controller(&state).reset().await?))
}

async fn get_settings(State(state): State<AppState>) -> Result<Json<ApiResponse<Settings>>, AppError> {
    Ok(Json(controller(&state).settings().await?))
}

async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<ApiResponse<Settings>>, AppError> {
    Ok(Json(controller(&state).update_settings(request).await?))
}

async fn get_geo_cache(State(state): State<AppState>) -> Result<Json<ApiResponse<GeoCache>>, AppError> {
    Ok(Json(controller(&state).geo_cache().await?))
}

async fn set_geo_cache(
    State(state): State<AppState>,
    Json(request): Json<GeoCacheRequest>,
) -> Result<Json<ApiResponse<LatLng>>, AppError> {
    Ok(Json(controller(&state).set_geo_cache(request).await?))
}

async fn get_expense_drafts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    Ok(Json(controller(&state).expense_drafts().await?))
}

async fn save_expense_drafts(
    State(state): State<AppState>,
    Json(drafts): Json<Vec<serde_json::Value>>,
) -> Result<Json<ApiResponse<usize>>, AppError> {
    Ok(Json(controller(&state).save_expense_drafts(drafts).await?))
}

async fn export_backup(State(state): State<AppState>) -> Result<Json<Backup>, AppError> {
    Ok(Json(controller(&state).export_backup().await?))
}

async fn import_backup(
    State(state): State<AppState>,
    Json(backup): Json<Backup>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    Ok(Json(controller(&state).import_backup(backup).await?))
}
