//! Router-level middleware: request tracing and CORS.

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{HttpMakeClassifier, TraceLayer};

/// Standard request/response tracing for every route.
pub fn trace_policy() -> TraceLayer<HttpMakeClassifier> {
    TraceLayer::new_for_http()
}

/// Permissive CORS for the four issue methods. The original frontend and
/// its test harness call the API cross-origin.
pub fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
}
