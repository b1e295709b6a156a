//! Task endpoints: the task collection, single tasks (fallback-aware),
//! nested subtasks, activity logs and attachments.

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::Response;
use axum::routing::{delete, get};
use axum::Router;
use serde_json::Value;

use super::{content_type, proxy, store_error};
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::{json_response, parse_id, HTTPError};

/// Registers task routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route(
            "/api/tasks/{id}/subtasks",
            get(list_subtasks).post(create_subtask),
        )
        .route("/api/tasks/{id}/activity", get(task_activity))
        .route(
            "/api/tasks/{id}/attachments",
            get(list_attachments).post(upload_attachment),
        )
        .route(
            "/api/tasks/{id}/attachments/{attachment_id}",
            delete(delete_attachment),
        )
}

async fn list_tasks(
    session: Session,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::GET,
        "/api/tasks",
        query.as_deref(),
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn create_task(
    session: Session,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::POST,
        "/api/tasks",
        None,
        content_type(&headers),
        Some(body),
        state.gateway.timeout(),
    )
    .await
}

/// Single-task read. Served from the fallback store when one is enabled,
/// otherwise proxied.
async fn get_task(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "task id")?;

    if state.fallback.is_enabled() {
        return match state.fallback.get_task(id).await.map_err(store_error)? {
            Some(task) => Ok(json_response(StatusCode::OK, &task)),
            None => Err(HTTPError::new(StatusCode::NOT_FOUND, "Task not found")),
        };
    }

    proxy(
        &state,
        &session,
        Method::GET,
        &format!("/api/tasks/{}", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

/// Single-task update. Fallback mode applies a shallow merge of the JSON
/// patch; proxy mode forwards the body unchanged.
async fn update_task(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "task id")?;

    if state.fallback.is_enabled() {
        let patch: Value = serde_json::from_slice(&body)
            .map_err(|_| HTTPError::new(StatusCode::BAD_REQUEST, "Invalid JSON body"))?;
        if !patch.is_object() {
            return Err(HTTPError::new(
                StatusCode::BAD_REQUEST,
                "Update body must be a JSON object",
            ));
        }

        return match state
            .fallback
            .update_task(id, &patch)
            .await
            .map_err(store_error)?
        {
            Some(task) => Ok(json_response(StatusCode::OK, &task)),
            None => Err(HTTPError::new(StatusCode::NOT_FOUND, "Task not found")),
        };
    }

    proxy(
        &state,
        &session,
        Method::PATCH,
        &format!("/api/tasks/{}", id),
        None,
        content_type(&headers),
        Some(body),
        state.gateway.timeout(),
    )
    .await
}

async fn delete_task(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "task id")?;

    if state.fallback.is_enabled() {
        return if state.fallback.delete_task(id).await.map_err(store_error)? {
            Ok(Response::builder()
                .status(StatusCode::NO_CONTENT)
                .body(axum::body::Body::empty())
                .unwrap())
        } else {
            Err(HTTPError::new(StatusCode::NOT_FOUND, "Task not found"))
        };
    }

    proxy(
        &state,
        &session,
        Method::DELETE,
        &format!("/api/tasks/{}", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn list_subtasks(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "task id")?;
    proxy(
        &state,
        &session,
        Method::GET,
        &format!("/api/tasks/{}/subtasks", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn create_subtask(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "task id")?;
    proxy(
        &state,
        &session,
        Method::POST,
        &format!("/api/tasks/{}/subtasks", id),
        None,
        content_type(&headers),
        Some(body),
        state.gateway.timeout(),
    )
    .await
}

async fn task_activity(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "task id")?;
    proxy(
        &state,
        &session,
        Method::GET,
        &format!("/api/tasks/{}/activity", id),
        query.as_deref(),
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

async fn list_attachments(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "task id")?;
    proxy(
        &state,
        &session,
        Method::GET,
        &format!("/api/tasks/{}/attachments", id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}

/// Attachment upload. The multipart body is forwarded byte-for-byte with
/// its original content type (boundary included).
async fn upload_attachment(
    session: Session,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "task id")?;
    proxy(
        &state,
        &session,
        Method::POST,
        &format!("/api/tasks/{}/attachments", id),
        None,
        content_type(&headers),
        Some(body),
        state.gateway.timeout(),
    )
    .await
}

async fn delete_attachment(
    session: Session,
    State(state): State<AppState>,
    Path((raw_id, raw_attachment_id)): Path<(String, String)>,
) -> Result<Response, HTTPError> {
    let id = parse_id(&raw_id, "task id")?;
    let attachment_id = parse_id(&raw_attachment_id, "attachment id")?;
    proxy(
        &state,
        &session,
        Method::DELETE,
        &format!("/api/tasks/{}/attachments/{}", id, attachment_id),
        None,
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}
