//! Repositorio de datos locales
//!
//! Lee y escribe las colecciones JSON (clientes, rutas, tramos, borradores)
//! del espacio de trabajo actual, más los datos compartidos: registro de
//! espacios, ajustes y caché de geocodificación. Cada escritura guarda la
//! colección completa; el último en escribir gana.

use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::KeyValueStore;
use crate::models::customer::CustomerRecord;
use crate::models::route::{default_routes, Route};
use crate::models::segment::{SegmentChoices, SegmentMap};
use crate::models::workspace::{monthly_workspace, GeoCache, LatLng, Settings, Workspace, WorkspaceRegistry};
use crate::utils::errors::StorageError;

const WORKSPACES_KEY: &str = "workspaces";
const SETTINGS_KEY: &str = "settings";
const GEOCACHE_KEY: &str = "geocache";

/// Colecciones por espacio de trabajo
#[derive(Debug, Clone, Copy)]
enum Collection {
    Customers,
    Routes,
    Segments,
    ExpenseDrafts,
}

impl Collection {
    const ALL: [Collection; 4] = [
        Collection::Customers,
        Collection::Routes,
        Collection::Segments,
        Collection::ExpenseDrafts,
    ];

    fn key(self, workspace_id: &str) -> String {
        let name = match self {
            Collection::Customers => "customers",
            Collection::Routes => "routes",
            Collection::Segments => "segments",
            Collection::ExpenseDrafts => "expense_drafts",
        };
        format!("ws:{}:{}", workspace_id, name)
    }
}

/// Copia de seguridad del espacio de trabajo actual
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: String,
    #[serde(default)]
    pub export_date: Option<String>,
    #[serde(default)]
    pub customers: Option<Vec<CustomerRecord>>,
    #[serde(default)]
    pub routes: Option<Vec<Route>>,
    #[serde(default)]
    pub segments: Option<SegmentMap>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

pub const BACKUP_VERSION: &str = "2.0";

#[derive(Clone)]
pub struct DataRepository {
    store: Arc<dyn KeyValueStore>,
}

impl DataRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, raw).await
    }

    // --- Espacios de trabajo ---

    pub async fn workspace_registry(&self) -> Result<WorkspaceRegistry, StorageError> {
        Ok(self.read(WORKSPACES_KEY).await?.unwrap_or_default())
    }

    async fn save_registry(&self, registry: &WorkspaceRegistry) -> Result<(), StorageError> {
        self.write(WORKSPACES_KEY, registry).await
    }

    /// Id del espacio actual
    pub async fn current_workspace(&self) -> Result<String, StorageError> {
        self.workspace_registry()
            .await?
            .current
            .ok_or(StorageError::NoWorkspace)
    }

    /// Crea un espacio con las rutas por defecto. Devuelve `None` si el id ya existe.
    pub async fn create_workspace(
        &self,
        id: &str,
        name: &str,
        make_current: bool,
    ) -> Result<Option<Workspace>, StorageError> {
        let mut registry = self.workspace_registry().await?;
        if registry.contains(id) {
            return Ok(None);
        }

        let workspace = Workspace {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.write(&Collection::Routes.key(id), &default_routes()).await?;

        registry.workspaces.push(workspace.clone());
        if make_current || registry.current.is_none() {
            registry.current = Some(id.to_string());
        }
        self.save_registry(&registry).await?;

        info!("🗂️ Espacio de trabajo creado: {} ({})", workspace.id, workspace.name);
        Ok(Some(workspace))
    }

    /// Garantiza que exista un espacio actual, creando el del mes en curso
    pub async fn ensure_current_workspace(&self) -> Result<String, StorageError> {
        if let Some(current) = self.workspace_registry().await?.current {
            return Ok(current);
        }
        let (id, name) = monthly_workspace(Utc::now());
        if self.create_workspace(&id, &name, true).await?.is_none() {
            let mut registry = self.workspace_registry().await?;
            registry.current = Some(id.clone());
            self.save_registry(&registry).await?;
        }
        Ok(id)
    }

    /// Cambia el espacio actual. Devuelve `false` si no existe.
    pub async fn switch_workspace(&self, id: &str) -> Result<bool, StorageError> {
        let mut registry = self.workspace_registry().await?;
        if !registry.contains(id) {
            return Ok(false);
        }
        registry.current = Some(id.to_string());
        self.save_registry(&registry).await?;
        info!("🗂️ Espacio de trabajo actual: {}", id);
        Ok(true)
    }

    /// Elimina un espacio y sus colecciones. Devuelve el nuevo espacio actual.
    pub async fn delete_workspace(&self, id: &str) -> Result<Option<Option<String>>, StorageError> {
        let mut registry = self.workspace_registry().await?;
        if registry.remove(id).is_none() {
            return Ok(None);
        }
        for collection in Collection::ALL {
            self.store.delete(&collection.key(id)).await?;
        }
        self.save_registry(&registry).await?;

        match &registry.current {
            Some(current) => info!("🗑️ Espacio {} eliminado, actual: {}", id, current),
            None => warn!("🗑️ Espacio {} eliminado, no queda ningún espacio", id),
        }
        Ok(Some(registry.current))
    }

    /// Borra clientes, rutas y tramos del espacio actual; ajustes y caché se conservan
    pub async fn reset_workspace(&self) -> Result<(), StorageError> {
        let workspace = self.current_workspace().await?;
        for collection in [Collection::Customers, Collection::Routes, Collection::Segments] {
            self.store.delete(&collection.key(&workspace)).await?;
        }
        warn!("🧹 Datos del espacio {} reiniciados", workspace);
        Ok(())
    }

    // --- Clientes ---

    pub async fn customers(&self) -> Result<Vec<CustomerRecord>, StorageError> {
        let workspace = self.current_workspace().await?;
        Ok(self.read(&Collection::Customers.key(&workspace)).await?.unwrap_or_default())
    }

    pub async fn save_customers(&self, customers: &[CustomerRecord]) -> Result<(), StorageError> {
        let workspace = self.current_workspace().await?;
        debug!("💾 Guardando {} clientes en {}", customers.len(), workspace);
        self.write(&Collection::Customers.key(&workspace), customers).await
    }

    // --- Rutas ---

    /// Rutas del espacio actual; el conjunto por defecto si nunca se guardaron
    pub async fn routes(&self) -> Result<Vec<Route>, StorageError> {
        let workspace = self.current_workspace().await?;
        Ok(self
            .read(&Collection::Routes.key(&workspace))
            .await?
            .unwrap_or_else(default_routes))
    }

    pub async fn save_routes(&self, routes: &[Route]) -> Result<(), StorageError> {
        let workspace = self.current_workspace().await?;
        self.write(&Collection::Routes.key(&workspace), routes).await
    }

    // --- Tramos ---

    pub async fn segments(&self) -> Result<SegmentMap, StorageError> {
        let workspace = self.current_workspace().await?;
        Ok(self.read(&Collection::Segments.key(&workspace)).await?.unwrap_or_default())
    }

    pub async fn save_segments(&self, segments: &SegmentMap) -> Result<(), StorageError> {
        let workspace = self.current_workspace().await?;
        self.write(&Collection::Segments.key(&workspace), segments).await
    }

    /// Elecciones de tipo de vía de una ruta (vacías si no hay)
    pub async fn route_segments(&self, route_id: &str) -> Result<SegmentChoices, StorageError> {
        Ok(self.segments().await?.remove(route_id).unwrap_or_default())
    }

    /// Reemplaza las elecciones de una ruta
    pub async fn save_route_segments(&self, route_id: &str, choices: SegmentChoices) -> Result<(), StorageError> {
        let mut segments = self.segments().await?;
        segments.insert(route_id.to_string(), choices);
        self.save_segments(&segments).await
    }

    // --- Borradores de gastos ---

    pub async fn expense_drafts(&self) -> Result<Vec<serde_json::Value>, StorageError> {
        let workspace = self.current_workspace().await?;
        Ok(self.read(&Collection::ExpenseDrafts.key(&workspace)).await?.unwrap_or_default())
    }

    pub async fn save_expense_drafts(&self, drafts: &[serde_json::Value]) -> Result<(), StorageError> {
        let workspace = self.current_workspace().await?;
        self.write(&Collection::ExpenseDrafts.key(&workspace), drafts).await
    }

    // --- Datos compartidos ---

    pub async fn settings(&self) -> Result<Settings, StorageError> {
        Ok(self.read(SETTINGS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        self.write(SETTINGS_KEY, settings).await
    }

    pub async fn geo_cache(&self) -> Result<GeoCache, StorageError> {
        Ok(self.read(GEOCACHE_KEY).await?.unwrap_or_default())
    }

    pub async fn set_geo_cache(&self, address: &str, position: LatLng) -> Result<(), StorageError> {
        let mut cache = self.geo_cache().await?;
        cache.insert(address.to_string(), position);
        self.write(GEOCACHE_KEY, &cache).await
    }

    // --- Copia de seguridad ---

    pub async fn export_backup(&self) -> Result<Backup, StorageError> {
        Ok(Backup {
            version: BACKUP_VERSION.to_string(),
            export_date: Some(Utc::now().to_rfc3339()),
            customers: Some(self.customers().await?),
            routes: Some(self.routes().await?),
            segments: Some(self.segments().await?),
            settings: Some(self.settings().await?),
        })
    }

    /// Restaura las colecciones presentes; la clave de API actual se conserva
    pub async fn import_backup(&self, backup: Backup) -> Result<(), StorageError> {
        if let Some(customers) = &backup.customers {
            self.save_customers(customers).await?;
        }
        if let Some(routes) = &backup.routes {
            self.save_routes(routes).await?;
        }
        if let Some(segments) = &backup.segments {
            self.save_segments(segments).await?;
        }
        if let Some(mut settings) = backup.settings {
            settings.api_key = self.settings().await?.api_key;
            self.save_settings(&settings).await?;
        }
        info!("📂 Copia de seguridad {} restaurada", backup.version);
        Ok(())
    }
}
