//! Router integration tests.
//!
//! Drive the full router (middleware included) in-process with `oneshot`.
//!
//! Run with: cargo test --test routes

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use aws_signal_app::config::{AppConfig, DEFAULT_SERVICE_NOTE};
use aws_signal_app::{create_router, AppState};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

async fn get(uri: &str) -> (StatusCode, header::HeaderMap, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, headers, json)
}

fn assert_utc_timestamp(value: &Value) {
    let ts = value.as_str().expect("timestamp should be a string");
    let parsed = chrono::DateTime::parse_from_rfc3339(ts).expect("timestamp should be RFC 3339");
    assert_eq!(parsed.offset().local_minus_utc(), 0);
    assert!(ts.ends_with("+00:00"), "timestamp {} lacks +00:00 offset", ts);
}

#[tokio::test]
async fn test_info() {
    let (status, headers, body) = get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["service"], "aws-signal-app");
    assert_eq!(body["note"], DEFAULT_SERVICE_NOTE);
    assert!(!body["hostname"].as_str().unwrap().is_empty());
    assert_utc_timestamp(&body["timestamp"]);
    assert_eq!(body.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn test_info_uses_configured_identity() {
    let mut config = AppConfig::default();
    config.service.name = "canary".to_string();
    config.service.note = "blue target group".to_string();
    let app = create_router(AppState::new(config));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["service"], "canary");
    assert_eq!(body["note"], "blue target group");
}

#[tokio::test]
async fn test_info_is_stable_across_calls() {
    let (_, _, first) = get("/").await;
    let (_, _, second) = get("/").await;

    assert_eq!(first["service"], second["service"]);
    assert_eq!(first["hostname"], second["hostname"]);
    assert_eq!(first["note"], second["note"]);
}

#[tokio::test]
async fn test_health() {
    let (status, headers, body) = get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["status"], "ok");
    assert_utc_timestamp(&body["timestamp"]);
    assert_eq!(body.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_responses_are_not_cacheable() {
    for uri in ["/", "/health", "/work?ms=0", "/work?ms=abc"] {
        let (_, headers, _) = get(uri).await;
        assert_eq!(headers[header::CACHE_CONTROL], "no-store", "{}", uri);
    }
}

#[tokio::test]
async fn test_work_zero() {
    let (status, _, body) = get("/work?ms=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["work_ms"], 0);
    assert!(body["iterations"].as_u64().is_some());
    assert!(!body["hostname"].as_str().unwrap().is_empty());
    assert_utc_timestamp(&body["timestamp"]);
}

#[tokio::test]
async fn test_work_spins_for_requested_duration() {
    let start = Instant::now();
    let (status, _, body) = get("/work?ms=50").await;

    assert_eq!(status, StatusCode::OK);
    assert!(start.elapsed() >= Duration::from_millis(50));
    assert_eq!(body["work_ms"], 50);
    assert!(body["iterations"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_work_default_duration() {
    let start = Instant::now();
    let (status, _, body) = get("/work").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["work_ms"], 200);
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_work_negative_clamps_to_zero() {
    let (status, _, body) = get("/work?ms=-50").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["work_ms"], 0);
}

#[tokio::test]
async fn test_work_large_clamps_to_max() {
    let start = Instant::now();
    let (status, _, body) = get("/work?ms=999999").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["work_ms"], 5000);
    assert!(start.elapsed() >= Duration::from_millis(5000));
}

#[tokio::test]
async fn test_work_rejects_non_integer() {
    for uri in ["/work?ms=abc", "/work?ms=12.5", "/work?ms="] {
        let (status, headers, body) = get(uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(body, json!({ "error": "ms must be an integer" }), "{}", uri);
    }
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (status, _, _) = get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/work")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_work_repeated_ms_uses_first() {
    let (status, headers, body) = get("/work?ms=1&ms=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["work_ms"], 1);
}

#[tokio::test]
async fn test_work_ignores_unrelated_params() {
    let (status, _, body) = get("/work?verbose&ms=5&other=x").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["work_ms"], 5);
}

#[tokio::test]
async fn test_work_accepts_digit_separators() {
    let (status, _, body) = get("/work?ms=1_0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["work_ms"], 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_health_served_while_work_spins() {
    let app = app();

    let busy = tokio::spawn(app.clone().oneshot(
        Request::get("/work?ms=1000").body(Body::empty()).unwrap(),
    ));

    // Let the spin get going before probing health
    tokio::time::sleep(Duration::from_millis(100)).await;

    let start = Instant::now();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let health_elapsed = start.elapsed();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        health_elapsed < Duration::from_millis(500),
        "health took {:?} while /work was spinning",
        health_elapsed
    );
    assert!(!busy.is_finished());

    let work = busy.await.unwrap().unwrap();
    assert_eq!(work.status(), StatusCode::OK);
}
