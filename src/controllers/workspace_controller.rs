use validator::Validate;

use crate::dto::workspace_dto::{
    CreateWorkspaceRequest, GeoCacheRequest, UpdateSettingsRequest, WorkspaceListResponse,
};
use crate::dto::ApiResponse;
use crate::models::workspace::{GeoCache, LatLng, Settings, Workspace};
use crate::repositories::{Backup, DataRepository};
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppError};

pub struct WorkspaceController {
    repository: DataRepository,
}

impl WorkspaceController {
    pub fn new(repository: DataRepository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<ApiResponse<WorkspaceListResponse>, AppError> {
        let registry = self.repository.workspace_registry().await?;
        Ok(ApiResponse::success(WorkspaceListResponse {
            current: registry.current,
            workspaces: registry.workspaces,
        }))
    }

    pub async fn create(&self, request: CreateWorkspaceRequest) -> Result<ApiResponse<Workspace>, AppError> {
        request.validate()?;

        let workspace = self
            .repository
            .create_workspace(&request.id, request.name.trim(), request.make_current)
            .await?
            .ok_or_else(|| conflict_error("Workspace", "id", &request.id))?;

        Ok(ApiResponse::success_with_message(
            workspace,
            "Espacio de trabajo creado".to_string(),
        ))
    }

    pub async fn activate(&self, id: &str) -> Result<ApiResponse<String>, AppError> {
        if !self.repository.switch_workspace(id).await? {
            return Err(not_found_error("Workspace", id));
        }
        Ok(ApiResponse::success(id.to_string()))
    }

    /// Devuelve el nuevo espacio actual (o ninguno)
    pub async fn delete(&self, id: &str) -> Result<ApiResponse<Option<String>>, AppError> {
        let current = self
            .repository
            .delete_workspace(id)
            .await?
            .ok_or_else(|| not_found_error("Workspace", id))?;

        Ok(ApiResponse::success_with_message(
            current,
            format!("Espacio de trabajo {} eliminado", id),
        ))
    }

    pub async fn reset(&self) -> Result<ApiResponse<String>, AppError> {
        let current = self.repository.current_workspace().await?;
        self.repository.reset_workspace().await?;
        Ok(ApiResponse::success_with_message(
            current,
            "Datos del espacio de trabajo reiniciados".to_string(),
        ))
    }

    pub async fn settings(&self) -> Result<ApiResponse<Settings>, AppError> {
        let settings = self.repository.settings().await?;
        Ok(ApiResponse::success(settings))
    }

    pub async fn update_settings(&self, request: UpdateSettingsRequest) -> Result<ApiResponse<Settings>, AppError> {
        let mut settings = self.repository.settings().await?;
        if let Some(home_address) = request.home_address {
            settings.home_address = home_address.trim().to_string();
        }
        if let Some(api_key) = request.api_key {
            settings.api_key = api_key.trim().to_string();
        }
        self.repository.save_settings(&settings).await?;
        Ok(ApiResponse::success(settings))
    }

    pub async fn geo_cache(&self) -> Result<ApiResponse<GeoCache>, AppError> {
        let cache = self.repository.geo_cache().await?;
        Ok(ApiResponse::success(cache))
    }

    pub async fn set_geo_cache(&self, request: GeoCacheRequest) -> Result<ApiResponse<LatLng>, AppError> {
        request.validate()?;
        if !(-90.0..=90.0).contains(&request.lat) || !(-180.0..=180.0).contains(&request.lng) {
            return Err(bad_request_error("Coordinates out of range"));
        }

        let position = LatLng {
            lat: request.lat,
            lng: request.lng,
        };
        self.repository.set_geo_cache(request.address.trim(), position).await?;
        Ok(ApiResponse::success(position))
    }

    pub async fn expense_drafts(&self) -> Result<ApiResponse<Vec<serde_json::Value>>, AppError> {
        let drafts = self.repository.expense_drafts().await?;
        Ok(ApiResponse::success(drafts))
    }

    pub async fn save_expense_drafts(
        &self,
        drafts: Vec<serde_json::Value>,
    ) -> Result<ApiResponse<usize>, AppError> {
        self.repository.save_expense_drafts(&drafts).await?;
        Ok(ApiResponse::success(drafts.len()))
    }

    pub async fn export_backup(&self) -> Result<Backup, AppError> {
        Ok(self.repository.export_backup().await?)
    }

    pub async fn import_backup(&self, backup: Backup) -> Result<ApiResponse<String>, AppError> {
        if backup.version.trim().is_empty() {
            return Err(bad_request_error("Backup version is required"));
        }
        let version = backup.version.clone();
        self.repository.import_backup(backup).await?;
        Ok(ApiResponse::success_with_message(
            version,
            "Copia de seguridad restaurada".to_string(),
        ))
    }
}
