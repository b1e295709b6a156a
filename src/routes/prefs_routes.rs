//! UI preference endpoints. Reads initialize from persisted values or
//! defaults; writes go through to storage before the response is sent.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::prefs::{Preferences, PrefsPatch};
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers preference routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/preferences",
        get(get_preferences).patch(update_preferences),
    )
}

async fn get_preferences(
    session: Session,
    State(state): State<AppState>,
) -> Json<Preferences> {
    Json(state.prefs.load(&session.user_id))
}

async fn update_preferences(
    session: Session,
    State(state): State<AppState>,
    Json(patch): Json<PrefsPatch>,
) -> Result<Json<Preferences>, HTTPError> {
    let updated = state.prefs.update(&session.user_id, &patch).map_err(|e| {
        tracing::error!("Failed to persist preferences: {}", e);
        HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage error")
    })?;
    Ok(Json(updated))
}
