use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::{runtime, JsonFileStore, PointRegistry, RegistryPolicy};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState, RouterOptions};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve `server.host:server.port`; hostnames such as `localhost` are allowed.
async fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let (host, port) = (cfg.server.host.as_str(), cfg.server.port);
    tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot resolve {host}:{port}: {e}")))?
        .next()
        .ok_or_else(|| StartupError::InvalidConfig(format!("no address for {host}:{port}")))
}

/// Open the store, wire the registry and build the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    runtime::ensure_env(&cfg.static_files.dir, &cfg.storage.data_file).await?;

    let store = JsonFileStore::open(&cfg.storage.data_file, cfg.storage.io_timeout()).await?;
    info!(path = %store.path().display(), "points store ready");

    let policy = RegistryPolicy { reject_blank_materials: cfg.registry.reject_blank_materials };
    let registry = PointRegistry::new(store, policy);

    Ok(routes::build_router(AppState::new(registry), RouterOptions::from(cfg), build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = load_bind_addr(&cfg).await?;
    info!(%addr, "starting recycle points server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
