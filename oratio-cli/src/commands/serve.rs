//! HTTP server command
//!
//! Runs the prayer subject API over the JSON data file by default, or over
//! Postgres when a database URL is configured. With Postgres the server
//! starts serving right away and the connection is established in the
//! background; record endpoints answer 503 until it is up.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use oratio_core::FileStore;
use oratio_server::db::{always_connected, spawn_supervisor, PgStore, RetryPolicy};
use oratio_server::http::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Postgres URL; when unset, records live in the JSON data file
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Path of the JSON data file used without a database
    #[arg(long, env = "ORATIO_DATA_FILE", default_value = "data.json")]
    pub data_file: PathBuf,

    /// Seconds between database connection attempts
    #[arg(long, default_value_t = 5)]
    pub retry_interval: u64,

    /// Give up connecting after this many attempts (default: retry forever)
    #[arg(long)]
    pub max_retries: Option<u32>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.bind, args.port),
    };

    match args.database_url {
        Some(database_url) => {
            tracing::info!(
                "Starting oratio server on {} (postgres store)",
                config.bind_addr
            );

            let policy = RetryPolicy {
                interval: Duration::from_secs(args.retry_interval),
                max_attempts: args.max_retries,
            };
            let (readiness, cell) = spawn_supervisor(database_url, policy);
            let store = Arc::new(PgStore::new(Arc::clone(&cell)));
            let state = Arc::new(AppState::new(store, readiness));

            run_server(state, config).await.context("Server error")?;

            // Let in-flight queries settle before the process exits.
            if let Some(pool) = cell.get() {
                pool.close().await;
            }
        }
        None => {
            tracing::info!(
                "Starting oratio server on {} (file store at {})",
                config.bind_addr,
                args.data_file.display()
            );

            let store = FileStore::open(&args.data_file)
                .await
                .context("Failed to open data file")?;
            let state = Arc::new(AppState::new(Arc::new(store), always_connected()));

            run_server(state, config).await.context("Server error")?;
        }
    }

    Ok(())
}
