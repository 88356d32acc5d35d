//! Background connection supervisor
//!
//! The server starts serving before the database is reachable. A supervisor
//! task retries the connection on a fixed interval and publishes its progress
//! over a watch channel; the pool cell is filled only once a connection (and
//! the schema check) has succeeded.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio::sync::{watch, OnceCell};

use crate::db::pool::{create_pool, ensure_schema};

/// Where the supervisor currently is in its connect loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Retry schedule for the connect loop.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Pause between attempts.
    pub interval: Duration,
    /// Give up after this many attempts; `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: None,
        }
    }
}

/// Spawn the supervisor task for `database_url`.
///
/// Returns the readiness receiver handlers gate on and the pool cell the
/// store reads from. The cell is set strictly before `Connected` is
/// published, so any observer of `Connected` will find the pool present.
pub fn spawn_supervisor(
    database_url: String,
    policy: RetryPolicy,
) -> (watch::Receiver<ConnectionState>, Arc<OnceCell<PgPool>>) {
    let (tx, rx) = watch::channel(ConnectionState::Disconnected);
    let cell = Arc::new(OnceCell::new());
    let task_cell = Arc::clone(&cell);

    tokio::spawn(async move {
        let pool = run_with_policy(policy, &tx, || try_connect(&database_url)).await;
        if let Some(pool) = pool {
            let _ = task_cell.set(pool);
            let _ = tx.send(ConnectionState::Connected);
            tracing::info!("database connection established");
        }
    });

    (rx, cell)
}

/// Readiness receiver for stores with no connection phase (file-backed mode).
pub fn always_connected() -> watch::Receiver<ConnectionState> {
    let (tx, rx) = watch::channel(ConnectionState::Connected);
    // Receivers keep the last value after the sender is gone.
    drop(tx);
    rx
}

async fn try_connect(url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = create_pool(url).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

async fn run_with_policy<T, E, F, Fut>(
    policy: RetryPolicy,
    state_tx: &watch::Sender<ConnectionState>,
    mut attempt: F,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let _ = state_tx.send(ConnectionState::Connecting);
        match attempt().await {
            Ok(value) => return Some(value),
            Err(err) => {
                let _ = state_tx.send(ConnectionState::Disconnected);
                tracing::warn!(
                    attempt = attempts,
                    error = %err,
                    "database connection failed, retrying"
                );
                if let Some(max) = policy.max_attempts {
                    if attempts >= max {
                        tracing::error!(attempts, "giving up on database connection");
                        return None;
                    }
                }
                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}
