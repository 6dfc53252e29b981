use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use maintenance_map::cache::{KeyValueStore, MemoryStore, RedisClient};
use maintenance_map::clients::GoogleDirectionsClient;
use maintenance_map::config::EnvironmentConfig;
use maintenance_map::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(if config.is_development() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    info!("🗺️ Maintenance Map - Planificador de rutas");
    info!("==========================================");

    // Almacén: Redis si hay URL, memoria en otro caso
    let store: Arc<dyn KeyValueStore> = match config.cache_config() {
        Some(cache_config) => match RedisClient::new(cache_config).await {
            Ok(client) => Arc::new(client),
            Err(e) => {
                error!("❌ Error conectando a Redis: {}", e);
                return Err(anyhow::anyhow!("Error de Redis: {}", e));
            }
        },
        None => {
            warn!("⚠️ REDIS_URL no configurada, usando almacén en memoria");
            Arc::new(MemoryStore::new())
        }
    };

    if config.google_maps_api_key.is_none() {
        warn!("⚠️ GOOGLE_MAPS_API_KEY no configurada, los tramos se marcarán como fallidos");
    }
    let directions = GoogleDirectionsClient::new(config.google_maps_api_key.clone().unwrap_or_default())?;

    let app_state = AppState::new(config.clone(), store, Arc::new(directions));
    let workspace = app_state.repository.ensure_current_workspace().await?;
    info!("🗂️ Espacio de trabajo actual: {}", workspace);

    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🗂️ Espacios de trabajo:");
    info!("   GET|POST /api/workspaces - Listar / crear");
    info!("   POST /api/workspaces/:id/activate - Cambiar espacio actual");
    info!("   DELETE /api/workspaces/:id - Eliminar espacio");
    info!("   POST /api/workspaces/current/reset - Reiniciar datos del espacio actual");
    info!("👥 Clientes:");
    info!("   GET|POST /api/customers - Listar / añadir");
    info!("   POST /api/customers/import - Importar filas");
    info!("   PUT|DELETE /api/customers/:id - Actualizar / eliminar");
    info!("   GET  /api/customers/summary - Resumen por estado");
    info!("🛣️ Rutas:");
    info!("   GET  /api/routes - Listar");
    info!("   PUT  /api/routes/:id - Renombrar / color");
    info!("   PUT  /api/routes/:id/order - Guardar orden completo");
    info!("   POST /api/routes/:id/position - Posición de un cliente");
    info!("   GET  /api/routes/:id/visits - Orden de visita");
    info!("   GET|PUT /api/routes/:id/segments - Tipos de vía por tramo");
    info!("   GET  /api/routes/:id/distance?mode= - Distancia de la ruta");
    info!("⚙️ Datos compartidos:");
    info!("   GET|PUT /api/settings, /api/geocache, /api/expense-drafts");
    info!("   GET|POST /api/backup - Exportar / importar");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
