//! Statistics endpoint. Subreports are selected via the query string,
//! forwarded verbatim.

use axum::extract::{RawQuery, State};
use axum::http::Method;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use super::proxy;
use crate::session::Session;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers statistics routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/statistics", get(get_statistics))
}

async fn get_statistics(
    session: Session,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, HTTPError> {
    proxy(
        &state,
        &session,
        Method::GET,
        "/api/statistics",
        query.as_deref(),
        None,
        None,
        state.gateway.timeout(),
    )
    .await
}
