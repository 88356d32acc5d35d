//! Store readiness gate
//!
//! Record endpoints are held behind this middleware and answer 503 until the
//! connection supervisor reports `Connected`. The health endpoint sits
//! outside the gate and stays reachable the whole time.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::db::ConnectionState;
use crate::http::error::ApiError;
use crate::http::server::AppState;

pub async fn require_store(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if *state.readiness.borrow() != ConnectionState::Connected {
        return Err(ApiError::Unavailable);
    }
    Ok(next.run(request).await)
}
