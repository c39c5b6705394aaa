use std::sync::Arc;

use notebook_notes::{
    config::{self, NotebookServiceConfig},
    handlers::rest,
    repository::postgres::PgNotebookRepository,
    service::NotebookService,
    shutdown_signal,
};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg: NotebookServiceConfig =
        config::load_config("NOTEBOOK_SERVICE_CONFIG").unwrap_or_else(|e| {
            tracing::error!("Failed to load notebook service config: {e}");
            panic!("failed to load config: {e}");
        });
    tracing::info!("Successfully loaded notebook service config");

    // Repository creation and migration
    let mut repo = PgNotebookRepository::new(&cfg.database_dsn)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let service = Arc::new(NotebookService::new(Arc::new(repo)));
    let router = rest::notebook_router(service);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to port {}: {e}", cfg.port);
            panic!("failed to bind to port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notebook service starting, listening on {}", addr),
        Err(e) => tracing::warn!("Notebook service starting, local address unknown: {e}"),
    }

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
