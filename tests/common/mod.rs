//! Shared fixtures: an in-process Simple JSON datasource
#![allow(dead_code)]

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s == "application/json")
        .unwrap_or(false)
}

async fn health(headers: HeaderMap) -> (StatusCode, &'static str) {
    if accepts_json(&headers) {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::NOT_ACCEPTABLE, "json only")
    }
}

async fn search(Json(body): Json<Value>) -> Json<Value> {
    let target = body["target"].as_str().unwrap_or_default();
    Json(json!([
        {"value": format!("{}-1", target), "text": "nb-of-babies"},
        {"value": format!("{}-2", target), "text": "pct-of-cows"},
        {"value": format!("{}-1", target), "text": "nb-of-calves"}
    ]))
}

/// One result object per target, each with two series over three timestamps
async fn query(Json(body): Json<Value>) -> Json<Value> {
    let targets = body["targets"].as_array().cloned().unwrap_or_default();
    let results: Vec<Value> = targets
        .iter()
        .map(|t| {
            let target = t["target"].as_str().unwrap_or_default();
            json!({
                "times": [1600, 1601, 1602],
                "data": [
                    {"label": target, "unit": "percent", "data": [0.1, 0.2, 0.3]},
                    {"label": format!("{}-short", target), "unit": null, "data": [1.0]}
                ]
            })
        })
        .collect();
    Json(Value::Array(results))
}

/// Echoes the request so tests can inspect what was sent
async fn annotations(Json(body): Json<Value>) -> Json<Value> {
    Json(json!([{"annotation": body["annotation"], "range": body["range"], "time": 1600000}]))
}

async fn tag_keys(Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body, json!({}));
    Json(json!([{"type": "string", "text": "city"}, {"type": "string", "text": "herd"}]))
}

async fn tag_values(Json(body): Json<Value>) -> Json<Value> {
    let key = body["key"].as_str().unwrap_or_default();
    Json(json!([{"text": format!("{}-a", key)}, {"text": format!("{}-b", key)}]))
}

fn datasource_router() -> Router {
    Router::new()
        .route("/", get(health))
        .route("/search", post(search))
        .route("/query", post(query))
        .route("/annotations", post(annotations))
        .route("/tag-keys", post(tag_keys))
        .route("/tag-values", post(tag_values))
}

fn failing_router() -> Router {
    Router::new()
        .route("/", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "datasource down") }))
        .route("/search", post(|| async { (StatusCode::BAD_GATEWAY, "upstream gone") }))
        .route("/tag-keys", post(|| async { (StatusCode::OK, "definitely not json") }))
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a healthy datasource
pub async fn spawn_datasource() -> String {
    init_tracing();
    serve(datasource_router()).await
}

/// Base URL of a datasource that fails or returns garbage
pub async fn spawn_failing_datasource() -> String {
    init_tracing();
    serve(failing_router()).await
}
