//! Notebook and Note resource services.
//!
//! Each service owns its own store. Notes may reference a notebook by id; the
//! reference is checked against the notebook service over HTTP at write time
//! and is not kept consistent afterwards.

pub mod config;
pub mod dto;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod repository;
pub mod service;

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    #[cfg(not(unix))]
    ctrl_c.await;

    tracing::info!("Shutdown signal received");
}
