//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! configuration, session resolution, token minting, the backend gateway
//! and the optional fallback store.

use std::sync::Arc;

use crate::config::ConfigV1;
use crate::gateway::Gateway;
use crate::mint::TokenMinter;
use crate::prefs::PrefsService;
use crate::session::{SessionStore, Sessions};
use crate::store::FallbackStore;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler. Handlers share no other
/// mutable state; each request mints its own backend token.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Session resolver chain for inbound requests.
    pub sessions: Arc<Sessions>,
    /// Store of opaque session ids issued by the login route.
    pub session_store: Arc<SessionStore>,
    /// Mints a fresh backend token per proxied call.
    pub minter: Arc<TokenMinter>,
    /// Client for the backend service.
    pub gateway: Arc<Gateway>,
    /// Local fallback store; disabled unless selected in config.
    pub fallback: Arc<dyn FallbackStore>,
    /// Per-user UI preference container.
    pub prefs: Arc<PrefsService>,
}
