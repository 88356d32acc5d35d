//! Health check endpoint
//!
//! Reachable even while the store is still connecting, so deploys and the
//! front-end can tell "server up, store pending" apart from "server down".

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::ConnectionState;
use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub store_connected: bool,
    pub timestamp: DateTime<Utc>,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store_connected: *state.readiness.borrow() == ConnectionState::Connected,
        timestamp: Utc::now(),
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
