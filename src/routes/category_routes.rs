//! Category endpoints.

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use super::{content_type, proxy};
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::{parse_id, HTTPError};

/// Registers category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

async fn list_categories(
    session: Session,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::GET,
        "/api/categories",
        query.as_deref(),
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn create_category(
    session: Session,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::POST,
        "/api/categories",
        None,
        content_type(&headers),
        Some(body),
        state.gateway.timeout(),
    )
    .await
}

async fn get_category(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "category id")?;
    proxy(
        &state,
        &session,
        Method::GET,
        &format!("/api/categories/{}", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn update_category(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "category id")?;
    proxy(
        &state,
        &session,
        Method::PUT,
        &format!("/api/categories/{}", id),
        None,
        content_type(&headers),
        Some(body),
        state.gateway.timeout(),
    )
    .await
}

async fn delete_category(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "category id")?;
    proxy(
        &state,
        &session,
        Method::DELETE,
        &format!("/api/categories/{}", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}
