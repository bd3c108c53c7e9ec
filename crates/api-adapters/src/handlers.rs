//! # API Handlers
//!
//! Thin axum handlers: extract loosely-typed input, call the service, and
//! shape the fixed JSON payloads. Validation and logical errors still
//! answer HTTP 200; only the body distinguishes them.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{json, Map, Value};

use crate::responses::{error_body, IssueView};
use services::IssueService;

/// State shared across all handlers; the service is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub issues: IssueService,
}

pub async fn get_issues(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let params: Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    match state.issues.search(&project, &params).await {
        Ok(issues) => {
            let views: Vec<IssueView> = issues.into_iter().map(IssueView::from).collect();
            Json(json!(views))
        }
        Err(err) => Json(error_body(&err)),
    }
}

pub async fn post_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let body = parse_body(&headers, &body);
    match state.issues.create(&project, &body).await {
        Ok(issue) => Json(json!(IssueView::from(issue))),
        Err(err) => Json(error_body(&err)),
    }
}

pub async fn put_issue(
    State(state): State<AppState>,
    Path(_project): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let body = parse_body(&headers, &body);
    match state.issues.update(&body).await {
        Ok(id) => Json(json!({ "result": "successfully updated", "_id": id })),
        Err(err) => Json(error_body(&err)),
    }
}

pub async fn delete_issue(
    State(state): State<AppState>,
    Path(_project): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let body = parse_body(&headers, &body);
    match state.issues.delete(&body).await {
        Ok(id) => Json(json!({ "result": "successfully deleted", "_id": id })),
        Err(err) => Json(error_body(&err)),
    }
}

/// Bodies are tolerated loose, keyed off the content type: a JSON object
/// or an urlencoded form both become the same map, and anything else is
/// treated as an empty body so the absence checks fire instead of
/// transport-level rejections.
fn parse_body(headers: &HeaderMap, bytes: &[u8]) -> Map<String, Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("application/json") {
        if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(bytes) {
            return map;
        }
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        if let Ok(pairs) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(bytes) {
            return pairs
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
        }
    }
    Map::new()
}
