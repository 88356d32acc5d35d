//! Prayer subject endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use oratio_core::{PrayerDate, PrayerRecord};

use crate::http::error::ApiResult;
use crate::http::extractors::PathDate;
use crate::http::server::AppState;

/// Create request
///
/// Fields are optional at the serde level so an absent field reports a
/// field-level validation error instead of a body rejection.
#[derive(Deserialize)]
pub struct CreatePrayerRequest {
    pub date: Option<String>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub count: Option<i64>,
}

/// Counter response for the pray endpoint
#[derive(Serialize)]
pub struct PrayResponse {
    pub count: i64,
}

/// GET /api/prayers - list every record, oldest first
async fn list_prayers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PrayerRecord>>> {
    let records = state.store.list_all().await?;
    Ok(Json(records))
}

/// GET /api/prayers/today - record for the current UTC date
async fn today_prayer(State(state): State<Arc<AppState>>) -> ApiResult<Json<PrayerRecord>> {
    let record = state.store.find_by_date(PrayerDate::today_utc()).await?;
    Ok(Json(record))
}

/// POST /api/prayers - create a record
async fn create_prayer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePrayerRequest>,
) -> ApiResult<(StatusCode, Json<PrayerRecord>)> {
    let record = PrayerRecord::new(
        req.date.as_deref().unwrap_or(""),
        req.title.as_deref().unwrap_or(""),
        req.subject.as_deref().unwrap_or(""),
        req.count,
    )?;

    let created = state.store.insert(record).await?;
    tracing::info!(date = %created.date, "prayer subject created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/prayers/{date}/pray - count one prayer for the record
async fn pray(
    State(state): State<Arc<AppState>>,
    PathDate(date): PathDate,
) -> ApiResult<Json<PrayResponse>> {
    let count = state.store.increment_count(date).await?;
    tracing::info!(%date, count, "prayer counted");
    Ok(Json(PrayResponse { count }))
}

/// DELETE /api/prayers/{date} - remove a record
async fn delete_prayer(
    State(state): State<Arc<AppState>>,
    PathDate(date): PathDate,
) -> ApiResult<Json<PrayerRecord>> {
    let removed = state.store.delete(date).await?;
    tracing::info!(%date, "prayer subject removed");
    Ok(Json(removed))
}

/// Prayer subject routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/prayers", get(list_prayers).post(create_prayer))
        .route("/api/prayers/today", get(today_prayer))
        .route("/api/prayers/{date}/pray", post(pray))
        .route("/api/prayers/{date}", delete(delete_prayer))
}
