//! Mealistik server entry point.
//!
//! Loads configuration from the environment, selects the store backend,
//! and starts the Axum HTTP server with graceful shutdown. Missing store
//! configuration is logged as a diagnostic and does not halt startup —
//! the client is still constructed and the failure surfaces as a
//! submission error when a user first submits.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use mealistik_core::submit::RecordSubmitter;
use mealistik_store::{DocumentStore, FirestoreStore, MemoryStore};

use mealistik_server::build_router;
use mealistik_server::config::{ServerConfig, StoreBackendType};
use mealistik_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!("Mealistik starting");

    // Diagnose missing store parameters, then continue anyway — the store
    // client is constructed regardless and submissions surface the failure.
    for variable in config.missing_store_vars() {
        warn!(variable, "missing store configuration; submissions will fail until it is set");
    }

    let state = build_app_state(&config)?;
    let app = build_router(state);

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Mealistik server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Mealistik server stopped");
    Ok(())
}

/// Build the shared application state around the configured store backend.
fn build_app_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    let (store, store_backend): (Arc<dyn DocumentStore>, &'static str) =
        match &config.store_backend {
            StoreBackendType::Memory => {
                info!("using in-memory store (data will not persist)");
                (Arc::new(MemoryStore::new()), "memory")
            }
            StoreBackendType::Firestore(firestore_config) => {
                info!(project_id = %firestore_config.project_id, "using Firestore store");
                (
                    Arc::new(
                        FirestoreStore::new(firestore_config.clone())
                            .context("failed to build Firestore client")?,
                    ),
                    "firestore",
                )
            }
        };

    Ok(Arc::new(AppState {
        submitter: RecordSubmitter::new(store),
        store_backend,
    }))
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
