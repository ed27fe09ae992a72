use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rental_backend::config::{DataSource, DatabaseConfig, EnvironmentConfig};
use rental_backend::database::DatabaseConnection;
use rental_backend::repositories::{CatalogSnapshot, MemoryStore};
use rental_backend::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Rental backend starting");

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;
    info!(
        "⚙️  Environment: {}, data source: {}",
        config.environment,
        config.data_source.as_str()
    );

    let state = match config.data_source.clone() {
        DataSource::Postgres => {
            let url = config
                .database_url
                .clone()
                .context("DATABASE_URL must be set")?;
            let pool_config =
                DatabaseConfig::from_env(url).context("Invalid database pool settings")?;
            let connection = DatabaseConnection::connect(&pool_config).await?;
            connection.run_migrations().await?;
            AppState::postgres(connection.pool().clone(), config)
        }
        DataSource::Static { snapshot_path } => {
            let snapshot = match snapshot_path {
                Some(path) => CatalogSnapshot::from_path(&path).await?,
                None => CatalogSnapshot::bundled()?,
            };
            info!(
                "📦 Static catalog loaded: {} vehicles, {} posts",
                snapshot.vehicles.len(),
                snapshot.posts.len()
            );
            AppState::in_memory(Arc::new(MemoryStore::from_snapshot(snapshot)), config)
        }
    };

    let addr: SocketAddr = state
        .config
        .server_url()
        .parse()
        .context("HOST/PORT do not form a socket address")?;
    // Peer addresses feed the rate limiter when no proxy header is present
    let app = create_router(state).into_make_service_with_connect_info::<SocketAddr>();

    info!("🌐 Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Ctrl+C received, shutting down"),
        _ = terminate => info!("🛑 SIGTERM received, shutting down"),
    }
}
