//! brainpad HTTP API server.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use brainpad_api::{config::ServerConfig, create_router, telemetry, AppState, StoreBackend};
use brainpad_core::NoteRepository;
use brainpad_db::{Database, MemoryNoteRepository, PoolConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let _log_guard = telemetry::init_tracing(&config.log);

    info!(
        log_format = config.log.format.as_str(),
        log_file = config.log.file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let notes: Arc<dyn NoteRepository> = match config.store {
        StoreBackend::Postgres => {
            let pool_config = PoolConfig {
                max_connections: config.db_max_connections,
                acquire_timeout: Duration::from_secs(config.db_acquire_timeout_secs),
            };
            let db = Database::connect(&config.database_url, &pool_config).await?;
            db.migrate().await?;
            info!(subsystem = "db", "Database connected and migrated");
            Arc::new(db.notes)
        }
        StoreBackend::Memory => {
            warn!("Using in-memory note store; notes are lost on restart");
            Arc::new(MemoryNoteRepository::new())
        }
    };

    let app = create_router(AppState::new(notes), &config.http);

    let addr = config.bind_addr();
    info!(addr = %addr, store = ?config.store, "brainpad-api listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("brainpad-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
