//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS (the API serves a small companion front-end)
//! - Large JSON body limit
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use oratio_core::RecordStore;

use super::{readiness, routes};
use crate::db::ConnectionState;

/// Request bodies above this are rejected before the handler runs.
const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}

/// Shared application state
pub struct AppState {
    /// Record store the handlers talk to.
    pub store: Arc<dyn RecordStore>,
    /// Connection progress published by the store supervisor.
    pub readiness: watch::Receiver<ConnectionState>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, readiness: watch::Receiver<ConnectionState>) -> Self {
        Self { store, readiness }
    }
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let records = routes::prayers::router().layer(middleware::from_fn_with_state(
        Arc::clone(&state),
        readiness::require_store,
    ));

    Router::new()
        .merge(routes::health::router())
        .merge(records)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(FileStore::open("data.json").await?);
/// let state = Arc::new(AppState::new(store, always_connected()));
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: Arc<AppState>, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
