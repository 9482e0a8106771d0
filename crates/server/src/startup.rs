use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use common::env::ensure_data_dir;
use configs::{DatabaseConfig, ServiceKind, ServiceSettings};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Open the service's database and bring its schema up to date.
pub async fn connect_and_migrate(kind: ServiceKind, cfg: &DatabaseConfig) -> Result<DatabaseConnection, StartupError> {
    ensure_data_dir(&cfg.url).await?;
    let db = models::db::connect_with_config(cfg).await?;
    let migrated = match kind {
        ServiceKind::Library => migration::LibraryMigrator::up(&db, None).await,
        ServiceKind::Profiles => migration::ProfilesMigrator::up(&db, None).await,
        ServiceKind::Directory => migration::DirectoryMigrator::up(&db, None).await,
    };
    migrated.map_err(|e| StartupError::Database(e.to_string()))?;
    info!(service = kind.name(), event = "migrated", "schema ready");
    Ok(db)
}

/// Build the full application for a connected database.
pub fn app(kind: ServiceKind, db: DatabaseConnection) -> Router {
    routes::build_router(AppState::new(kind, db))
}

async fn shutdown_signal(service: &'static str) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(service, error = %e, "failed to listen for Ctrl+C");
        return;
    }
    info!(service, event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: connect, migrate, bind and serve until Ctrl+C.
pub async fn run(settings: ServiceSettings) -> Result<(), StartupError> {
    let service = settings.kind.name();
    let addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", settings.bind_addr())))?;

    let db = connect_and_migrate(settings.kind, &settings.database).await?;
    let app = app(settings.kind, db);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    info!(service, event = "listening", %addr, "accepting requests");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(service))
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
