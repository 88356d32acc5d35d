//! HTTP server layer
//!
//! Axum router, route handlers, error mapping, and the readiness gate that
//! holds record traffic back until the store is connected.

pub mod error;
pub mod extractors;
pub mod readiness;
pub mod routes;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
