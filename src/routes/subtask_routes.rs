//! Subtask endpoints addressed by subtask id.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use axum::routing::patch;
use axum::Router;

use super::{content_type, proxy};
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::{parse_id, HTTPError};

/// Registers subtask routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/subtasks/{id}",
        patch(update_subtask).delete(delete_subtask),
    )
}

async fn update_subtask(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "subtask id")?;
    proxy(
        &state,
        &session,
        Method::PATCH,
        &format!("/api/subtasks/{}", id),
        None,
        content_type(&headers),
        Some(body),
        state.gateway.timeout(),
    )
    .await
}

async fn delete_subtask(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "subtask id")?;
    proxy(
        &state,
        &session,
        Method::DELETE,
        &format!("/api/subtasks/{}", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}
