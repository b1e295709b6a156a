//! HTTP route definitions and handlers.
//!
//! One module per backend resource, plus authentication, preferences and
//! health. Every proxying handler binds the same core: resolve the session,
//! mint a backend token, forward, relay.

mod auth_routes;
mod category_routes;
mod chat_routes;
mod health_routes;
mod prefs_routes;
mod statistics_routes;
mod subtask_routes;
mod tag_routes;
mod task_routes;

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::Response;
use axum::Router;

use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes::routes())
        .merge(task_routes::routes())
        .merge(subtask_routes::routes())
        .merge(tag_routes::routes())
        .merge(category_routes::routes())
        .merge(statistics_routes::routes())
        .merge(chat_routes::routes())
        .merge(prefs_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}

/// The one proxy operation every resource handler binds: mint a token for
/// the session's user, then forward and relay.
pub(crate) async fn proxy(
    state: &AppState,
    session: &Session,
    method: Method,
    path: &str,
    query: Option<&str>,
    content_type: Option<&str>,
    body: Option<Bytes>,
    timeout: Duration,
) -> Result<Response, HTTPError> {
    let token = state.minter.mint(&session.user_id)?;
    state
        .gateway
        .forward(method, path, query, &token, content_type, body, timeout)
        .await
}

/// The inbound content type, forwarded so JSON and multipart bodies travel
/// unchanged.
pub(crate) fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

/// Maps fallback-store errors to an HTTP response.
pub(crate) fn store_error(e: String) -> HTTPError {
    tracing::error!("Fallback store error: {}", e);
    HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage error")
}
