//! Authentication endpoints: login against config-declared users, logout,
//! and session introspection.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::session::{session::cookie_value, Session};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", get(get_session))
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct SessionResponse {
    user_id: String,
}

/// Checks credentials against the users declared in the configuration and
/// issues a store-backed session on success.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, HTTPError> {
    let valid = state
        .config
        .session
        .users
        .iter()
        .any(|u| u.username == request.username && u.password == request.password);

    if !valid {
        return Err(HTTPError::new(
            StatusCode::UNAUTHORIZED,
            "Invalid username or password",
        ));
    }

    let sid = state.session_store.create(&request.username).await;
    info!("User '{}' logged in", request.username);

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        state.sessions.cookie_name(),
        sid,
        state.config.session.exp
    );

    let mut response = (
        StatusCode::OK,
        Json(SessionResponse {
            user_id: request.username,
        }),
    )
        .into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        cookie.parse().map_err(|_| {
            HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to set cookie")
        })?,
    );
    Ok(response)
}

/// Drops the store-backed session if one exists and clears the cookie.
/// Idempotent; succeeds whether or not a session was present.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, HTTPError> {
    if let Some(sid) = cookie_value(&headers, state.sessions.cookie_name()) {
        state.session_store.remove(&sid).await;
    }

    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        state.sessions.cookie_name()
    );
    Ok(Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(header::SET_COOKIE, cookie)
        .body(Body::empty())
        .unwrap())
}

/// Returns the identity behind the current request, or 401.
async fn get_session(session: Session) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: session.user_id,
    })
}
