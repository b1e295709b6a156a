//! Tag endpoints.

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use axum::routing::{delete, get};
use axum::Router;

use super::{content_type, proxy};
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::{parse_id, HTTPError};

/// Registers tag routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tags", get(list_tags).post(create_tag))
        .route("/api/tags/{id}", delete(delete_tag))
}

async fn list_tags(
    session: Session,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::GET,
        "/api/tags",
        query.as_deref(),
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn create_tag(
    session: Session,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::POST,
        "/api/tags",
        None,
        content_type(&headers),
        Some(body),
        state.gateway.timeout(),
    )
    .await
}

async fn delete_tag(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "tag id")?;
    proxy(
        &state,
        &session,
        Method::DELETE,
        &format!("/api/tags/{}", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}
