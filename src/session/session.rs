use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{header, HeaderMap, StatusCode};
use http::request::Parts;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cookie_resolver::SignedCookieResolver;
use super::session_store::SessionStore;
use crate::config::SessionConfig;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// The identity behind one inbound request. Obtained transiently per
/// request and never persisted by this layer.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Session {
    pub user_id: String,
}

/// A session resolver turns a session cookie value into a Session, or
/// explains why it could not. Resolution has no side effects.
#[async_trait::async_trait]
pub trait SessionResolver: Send + Sync {
    fn get_name(&self) -> &str;
    async fn resolve(&self, cookie_value: &str) -> Result<Session, String>;
}

/// Holds the resolver chain and the cookie name it reads.
pub struct Sessions {
    cookie_name: String,
    resolvers: Vec<Box<dyn SessionResolver>>,
}

impl Sessions {
    /// Builds the resolver chain: signed-cookie verification first, then a
    /// lookup of opaque ids in the session store.
    pub fn new(config: &SessionConfig, store: Arc<SessionStore>) -> Self {
        let resolvers: Vec<Box<dyn SessionResolver>> = vec![
            Box::new(SignedCookieResolver::new(&config.secret)),
            Box::new(store) as Box<dyn SessionResolver>,
        ];

        Sessions {
            cookie_name: config.cookie_name.clone(),
            resolvers,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Resolves a session from the request headers. Absence of a resolvable
    /// session is reported as None; the caller branches explicitly.
    pub async fn resolve(&self, headers: &HeaderMap, ip: &str) -> Option<Session> {
        let cookie_value = match cookie_value(headers, &self.cookie_name) {
            Some(v) => v,
            None => {
                debug!("No '{}' cookie on request from {}", self.cookie_name, ip);
                return None;
            }
        };

        for resolver in &self.resolvers {
            match resolver.resolve(&cookie_value).await {
                Ok(session) => {
                    debug!(
                        "Resolver '{}' resolved user '{}'",
                        resolver.get_name(),
                        session.user_id
                    );
                    return Some(session);
                }
                Err(e) => debug!("Resolver '{}' failed: {}", resolver.get_name(), e),
            }
        }

        warn!("No resolver accepted the session cookie from {}", ip);
        None
    }
}

/// Extracts the named cookie from a `Cookie` header, if present.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|pair| {
            let (k, v) = pair.trim().split_once('=')?;
            (k == name).then(|| v.to_string())
        })
}

/// Implementation of the request extractor for Session. Handlers taking a
/// `Session` argument reject unauthenticated requests with a 401 before any
/// other work happens, so no outbound call is ever made for them.
impl FromRequestParts<AppState> for Session {
    type Rejection = HTTPError;
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Session, HTTPError> {
        // Retrieve the client IP (for logging purposes).
        let client_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| {
                warn!("Unable to determine client IP address.");
                "unknown".to_string()
            });

        match state.sessions.resolve(&parts.headers, &client_ip).await {
            Some(session) => Ok(session),
            None => Err(HTTPError::new(
                StatusCode::UNAUTHORIZED,
                "Authentication required",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_cookie_value_finds_named_cookie() {
        let headers = headers_with_cookie("other=1; taskgate_session=abc123; theme=dark");
        assert_eq!(
            cookie_value(&headers, "taskgate_session").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_cookie_value_missing() {
        let headers = headers_with_cookie("other=1");
        assert!(cookie_value(&headers, "taskgate_session").is_none());
    }

    #[tokio::test]
    async fn test_resolve_without_cookie_is_none() {
        let config = SessionConfig {
            cookie_name: "taskgate_session".to_string(),
            secret: "session-secret".to_string(),
            exp: 3600,
            users: vec![],
        };
        let sessions = Sessions::new(&config, Arc::new(SessionStore::new()));
        let result = sessions.resolve(&HeaderMap::new(), "127.0.0.1").await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_resolve_store_backed_session() {
        let config = SessionConfig {
            cookie_name: "taskgate_session".to_string(),
            secret: "session-secret".to_string(),
            exp: 3600,
            users: vec![],
        };
        let store = Arc::new(SessionStore::new());
        let sid = store.create("alice").await;
        let sessions = Sessions::new(&config, store);

        let headers = headers_with_cookie(&format!("taskgate_session={}", sid));
        let session = sessions
            .resolve(&headers, "127.0.0.1")
            .await
            .expect("session should resolve");
        assert_eq!(session.user_id, "alice");
    }
}
