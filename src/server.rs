//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, dictionary bootstrap, default
//! credentials and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::connect;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool and migrations
/// - Dictionary pool from `DICTIONARY_PATH` when empty
/// - Default administrator credential when none exists
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The vocabulary is missing, unreadable or empty
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(&config.database_options()).await?;
    tracing::info!("Connected to database");

    let state = AppState::new(Arc::new(pool.clone()), &config);

    let stats = state
        .dictionary_service
        .ensure_loaded(&config.dictionary_path)
        .await
        .context("Failed to initialize dictionary")?;
    tracing::info!(
        total = stats.total,
        unused = stats.unused,
        "Dictionary ready"
    );

    state
        .auth_service
        .ensure_default_credentials()
        .await
        .context("Failed to initialize credentials")?;

    let app = app_router(state, &config);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
