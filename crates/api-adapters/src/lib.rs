//! # api-adapters
//!
//! The HTTP routing layer for the issue tracker.

pub mod handlers;
pub mod middleware;
pub mod responses;

use axum::routing::get;
use axum::Router;

use handlers::AppState;

/// Builds the `/api/issues/{project}` route family.
///
/// # Developer Note
/// The path is mounted in full here rather than nested, so the binary can
/// merge additional route families later without touching this crate.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/issues/{project}",
            get(handlers::get_issues)
                .post(handlers::post_issue)
                .put(handlers::put_issue)
                .delete(handlers::delete_issue),
        )
        .layer(middleware::trace_policy())
        .layer(middleware::cors_policy())
        .with_state(state)
}
