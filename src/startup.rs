//! Application startup and server initialization.
//!
//! This module handles the creation and configuration of the HTTP server,
//! including session resolution, token minting, the backend gateway,
//! fallback store selection and route setup.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::gateway::Gateway;
use crate::mint::TokenMinter;
use crate::prefs::{FileStorage, MemoryStorage, PrefsService, PrefsStorage};
use crate::routes;
use crate::session::{SessionStore, Sessions};
use crate::state::AppState;
use crate::store::create_store;

/// Builds the shared application state from the configuration. Also used by
/// the integration tests to assemble a router without binding a socket.
pub async fn build_state(config: Arc<ConfigV1>) -> AppState {
    let session_store = Arc::new(SessionStore::new());
    let sessions = Arc::new(Sessions::new(&config.session, session_store.clone()));
    let minter = Arc::new(TokenMinter::new(config.jwt.resolve_secret(), config.jwt.exp));
    let gateway = Arc::new(Gateway::new(
        config.backend.resolve_base_url(),
        config.backend.timeout_secs,
        config.backend.chat_timeout_secs,
    ));
    let fallback = create_store(&config.store).await;

    let prefs_storage: Box<dyn PrefsStorage> = match &config.preferences.dir {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => Box::new(MemoryStorage::new()),
    };
    let prefs = Arc::new(PrefsService::new(prefs_storage));

    AppState {
        config,
        sessions,
        session_store,
        minter,
        gateway,
        fallback,
        prefs,
    }
}

/// Initializes and runs the application server.
///
/// Binds to the address specified in the configuration and starts serving
/// requests.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address
/// or encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(config.clone()).await;

    info!("Starting server on {}", config.bind_address);
    info!("Proxying to backend at {}", config.backend.resolve_base_url());

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .expect("Could not bind to specified address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .unwrap();

    Ok(())
}
