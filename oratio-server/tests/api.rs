//! End-to-end API tests over a file-backed store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tempfile::TempDir;
use tokio::sync::watch;
use tower::ServiceExt;

use oratio_core::{FileStore, PrayerDate};
use oratio_server::db::{always_connected, ConnectionState};
use oratio_server::http::{build_router, AppState};

async fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("data.json")).await.unwrap();
    let state = Arc::new(AppState::new(Arc::new(store), always_connected()));
    (dir, build_router(state))
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn empty_store_lists_empty_array() {
    let (_dir, app) = test_app().await;

    let response = app.oneshot(get("/api/prayers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn create_then_list_round_trips() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/prayers",
            r#"{"date": "2026-03-01", "title": "Peace", "subject": "For the family"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["date"], "2026-03-01");
    assert_eq!(created["count"], 0);

    let response = app.oneshot(get("/api/prayers")).await.unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "Peace");
}

#[tokio::test]
async fn create_without_subject_is_400() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/prayers",
            r#"{"date": "2026-03-01", "title": "Peace"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "validation_error");
}

#[tokio::test]
async fn create_rejects_malformed_date() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/prayers",
            r#"{"date": "03/01/2026", "title": "Peace", "subject": "For the family"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "validation_error");
}

#[tokio::test]
async fn create_with_invalid_json_is_400() {
    let (_dir, app) = test_app().await;

    let response = app.oneshot(post_json("/api/prayers", "{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_date_is_400_and_first_record_kept() {
    let (_dir, app) = test_app().await;
    let first = r#"{"date": "2026-03-02", "title": "First", "subject": "Original"}"#;
    let second = r#"{"date": "2026-03-02", "title": "Second", "subject": "Replacement"}"#;

    let response = app
        .clone()
        .oneshot(post_json("/api/prayers", first))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json("/api/prayers", second))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "duplicate_date");

    let response = app.oneshot(get("/api/prayers")).await.unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "First");
}

#[tokio::test]
async fn create_accepts_explicit_count() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/prayers",
            r#"{"date": "2026-03-05", "title": "Peace", "subject": "For the family", "count": 5}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["count"], 5);
}

#[tokio::test]
async fn create_rejects_negative_count() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/prayers",
            r#"{"date": "2026-03-05", "title": "Peace", "subject": "For the family", "count": -1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "validation_error");
}

#[tokio::test]
async fn pray_increments_count() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/prayers",
            r#"{"date": "2026-03-03", "title": "Peace", "subject": "For the family"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_empty("/api/prayers/2026-03-03/pray"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 1);

    let response = app
        .oneshot(post_empty("/api/prayers/2026-03-03/pray"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["count"], 2);
}

#[tokio::test]
async fn pray_unknown_date_is_404() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(post_empty("/api/prayers/1990-01-01/pray"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn pray_garbage_date_is_404() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(post_empty("/api/prayers/not-a-date/pray"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_record_then_404() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/prayers",
            r#"{"date": "2026-03-04", "title": "Healing", "subject": "For a friend"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(delete("/api/prayers/2026-03-04"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Healing");

    let response = app.oneshot(delete("/api/prayers/2026-03-04")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn today_resolves_current_utc_date() {
    let (_dir, app) = test_app().await;

    let response = app.clone().oneshot(get("/api/prayers/today")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let today = PrayerDate::today_utc();
    let body = format!(r#"{{"date": "{today}", "title": "Today", "subject": "Now"}}"#);
    let response = app
        .clone()
        .oneshot(post_json("/api/prayers", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/api/prayers/today")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Today");
}

#[tokio::test]
async fn health_reports_connected_store() {
    let (_dir, app) = test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storeConnected"], true);
}

#[tokio::test]
async fn records_gate_on_store_readiness() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("data.json")).await.unwrap();
    let (tx, rx) = watch::channel(ConnectionState::Connecting);
    let state = Arc::new(AppState::new(Arc::new(store), rx));
    let app = build_router(state);

    let response = app.clone().oneshot(get("/api/prayers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["error"], "store_unavailable");

    // Health stays reachable while the store is still connecting.
    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["storeConnected"], false);

    tx.send(ConnectionState::Connected).unwrap();
    let response = app.oneshot(get("/api/prayers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_garbage_date_is_404() {
    let (_dir, app) = test_app().await;

    let response = app.oneshot(delete("/api/prayers/tomorrow")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
