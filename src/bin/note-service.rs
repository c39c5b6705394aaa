use std::sync::Arc;

use notebook_notes::{
    config::{self, NoteServiceConfig},
    handlers::rest,
    lookup::HttpNotebookLookup,
    repository::postgres::PgNoteRepository,
    service::NoteService,
    shutdown_signal,
};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg: NoteServiceConfig = config::load_config("NOTE_SERVICE_CONFIG").unwrap_or_else(|e| {
        tracing::error!("Failed to load note service config: {e}");
        panic!("failed to load config: {e}");
    });
    tracing::info!(
        "Successfully loaded note service config, notebook service at {} (timeout {:?})",
        cfg.notebook_service_url,
        cfg.lookup_timeout
    );

    let lookup = HttpNotebookLookup::new(&cfg.notebook_service_url, cfg.lookup_timeout)
        .unwrap_or_else(|e| {
            tracing::error!("Failed to set up notebook lookup client: {e}");
            panic!("failed to set up notebook lookup client: {e}");
        });

    // Repository creation and migration
    let mut repo = PgNoteRepository::new(&cfg.database_dsn)
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
    let service = Arc::new(NoteService::new(Arc::new(repo), Arc::new(lookup)));
    let router = rest::note_router(service);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to port {}: {e}", cfg.port);
            panic!("failed to bind to port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Note service starting, listening on {}", addr),
        Err(e) => tracing::warn!("Note service starting, local address unknown: {e}"),
    }

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
