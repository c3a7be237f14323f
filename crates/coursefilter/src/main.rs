use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coursefilter::catalog::CatalogSnapshot;
use coursefilter::config::AppConfig;
use coursefilter::export::CourseExporter;
use coursefilter::server::create_router;
use coursefilter::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    info!("==================================================");
    info!("NCU Course Filter Backend Server");
    info!("==================================================");

    let catalog = CatalogSnapshot::load(&config.catalog_path);
    info!("Loaded {} courses", catalog.len());

    let exporter = CourseExporter::new(&config.export_source_path);
    let state = Arc::new(AppState::new(catalog, exporter, config.list_limit));
    let app = create_router(state);

    let addr = config.socket_addr()?;
    info!("Server running at: http://{}", addr);
    info!("API endpoints:");
    info!("  - POST /api/filter-courses");
    info!("  - GET  /api/courses");
    info!("  - GET  /api/health");
    info!("  - POST /api/download-courses");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
