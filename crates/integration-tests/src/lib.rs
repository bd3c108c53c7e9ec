//! Shared plumbing for the end-to-end tests: an app wired against the
//! in-memory store and a tiny HTTP driver over `tower::ServiceExt`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use api_adapters::handlers::AppState;
use services::IssueService;
use storage_adapters::MemoryIssueStore;

/// A fresh application over an empty in-memory store.
pub fn test_app() -> Router {
    let store = Arc::new(MemoryIssueStore::new());
    api_adapters::router(AppState {
        issues: IssueService::new(store),
    })
}

/// Sends one request and returns the JSON body. Asserts the blanket
/// status contract along the way: every answer is HTTP 200.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Value {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn get(app: &Router, uri: &str) -> Value {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> Value {
    send(app, "POST", uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> Value {
    send(app, "PUT", uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, body: Option<Value>) -> Value {
    send(app, "DELETE", uri, body).await
}
