//! Chat and conversation endpoints. Chat calls are LLM-backed and run
//! under the longer timeout; conversation reads and deletes are
//! fallback-aware.

use axum::body::{Body, Bytes};
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;

use super::{content_type, proxy, store_error};
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::{json_response, HTTPError};

/// Registers chat and conversation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat/history", get(chat_history))
        .route(
            "/api/conversations",
            get(list_conversations).post(create_conversation),
        )
        .route(
            "/api/conversations/{id}",
            get(get_conversation).delete(delete_conversation),
        )
        .route(
            "/api/conversations/{id}/messages",
            get(conversation_messages),
        )
}

async fn chat(
    session: Session,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::POST,
        "/api/chat",
        None,
        content_type(&headers),
        Some(body),
        state.gateway.chat_timeout(),
    )
    .await
}

async fn chat_history(
    session: Session,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::GET,
        "/api/chat/history",
        query.as_deref(),
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn list_conversations(
    session: Session,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::GET,
        "/api/conversations",
        query.as_deref(),
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn create_conversation(
    session: Session,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::POST,
        "/api/conversations",
        None,
        content_type(&headers),
        Some(body),
        state.gateway.timeout(),
    )
    .await
}

async fn get_conversation(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HTTPError> {
    if state.fallback.is_enabled() {
        return match state
            .fallback
            .get_conversation(&id)
            .await
            .map_err(store_error)?
        {
            Some(conversation) => Ok(json_response(StatusCode::OK, &conversation)),
            None => Err(HTTPError::new(
                StatusCode::NOT_FOUND,
                "Conversation not found",
            )),
        };
    }

    proxy(
        &state,
        &session,
        Method::GET,
        &format!("/api/conversations/{}", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn delete_conversation(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HTTPError> {
    if state.fallback.is_enabled() {
        return if state
            .fallback
            .delete_conversation(&id)
            .await
            .map_err(store_error)?
        {
            Ok(Response::builder()
                .status(StatusCode::NO_CONTENT)
                .body(Body::empty())
                .unwrap())
        } else {
            Err(HTTPError::new(
                StatusCode::NOT_FOUND,
                "Conversation not found",
            ))
        };
    }

    proxy(
        &state,
        &session,
        Method::DELETE,
        &format!("/api/conversations/{}", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn conversation_messages(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HTTPError> {
    if state.fallback.is_enabled() {
        return match state
            .fallback
            .conversation_messages(&id)
            .await
            .map_err(store_error)?
        {
            Some(messages) => Ok(json_response(StatusCode::OK, &Value::Array(messages))),
            None => Err(HTTPError::new(
                StatusCode::NOT_FOUND,
                "Conversation not found",
            )),
        };
    }

    proxy(
        &state,
        &session,
        Method::GET,
        &format!("/api/conversations/{}/messages", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}
