use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::session::{Session, SessionResolver};

/// In-memory session store mapping opaque session ids to user ids.
/// Sessions created here live for the process lifetime only.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a session for a user and returns the new opaque id.
    pub async fn create(&self, user_id: &str) -> String {
        let sid = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(sid.clone(), user_id.to_string());
        sid
    }

    pub async fn get(&self, sid: &str) -> Option<String> {
        self.sessions.read().await.get(sid).cloned()
    }

    /// Removes a session, returning whether it existed.
    pub async fn remove(&self, sid: &str) -> bool {
        self.sessions.write().await.remove(sid).is_some()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The store doubles as a resolver, so opaque ids in the session cookie
/// authenticate directly against it.
#[async_trait::async_trait]
impl SessionResolver for Arc<SessionStore> {
    fn get_name(&self) -> &str {
        "session-store"
    }

    async fn resolve(&self, cookie_value: &str) -> Result<Session, String> {
        debug!("Looking up session id in store");
        match self.get(cookie_value).await {
            Some(user_id) => Ok(Session { user_id }),
            None => Err("Session not found".to_string()),
        }
    }
}
