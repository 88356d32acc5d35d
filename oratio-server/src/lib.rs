//! oratio-server: HTTP API over the record store
//!
//! Axum routes for the prayer CRUD surface, the Postgres-backed store, and
//! the connection supervisor that keeps the `/api` routes gated behind a 503
//! until storage is ready.

pub mod db;
pub mod http;

pub use db::{ConnectionState, PgStore, RetryPolicy};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
