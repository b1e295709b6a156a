#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Method, Request};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use serde_json::Value;
use taskgate::config::{Config, ConfigV1};
use taskgate::routes::create_router;
use taskgate::session::SignedCookieResolver;
use taskgate::startup::build_state;
use taskgate::state::AppState;

pub const SESSION_SECRET: &str = "test-session-secret";
pub const BACKEND_SECRET: &str = "test-backend-secret";

/// Renders a test configuration pointing at the given backend URL.
pub fn test_config(backend_url: &str, fallback: bool, timeout_secs: u64) -> ConfigV1 {
    let store = if fallback {
        "enabled: true\n  type: memory"
    } else {
        "enabled: false"
    };
    let yaml = format!(
        r#"
version: "1.0.0"
bind_address: 127.0.0.1:8090
logging:
  level: "warn"
  format: "json"
backend:
  base_url: "{backend_url}"
  timeout_secs: {timeout_secs}
  chat_timeout_secs: {timeout_secs}
jwt:
  secret: {BACKEND_SECRET}
  exp: 86400
session:
  cookie_name: taskgate_session
  secret: {SESSION_SECRET}
  exp: 3600
  users:
    - username: adam
      password: admin
store:
  {store}
"#
    );
    load_config_yaml(&yaml)
}

/// Like `test_config`, but with no backend-token secret configured.
pub fn test_config_without_secret(backend_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
bind_address: 127.0.0.1:8090
logging:
  level: "warn"
  format: "json"
backend:
  base_url: "{backend_url}"
jwt:
  exp: 86400
session:
  cookie_name: taskgate_session
  secret: {SESSION_SECRET}
  exp: 3600
  users: []
store:
  enabled: false
"#
    );
    load_config_yaml(&yaml)
}

pub fn load_config_yaml(yaml: &str) -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(yaml))
        .extract()
        .expect("Failed to parse test config YAML");

    match config {
        Config::ConfigV1(cfg) => cfg,
    }
}

pub async fn build_app(config: ConfigV1) -> (Router, AppState) {
    let state = build_state(Arc::new(config)).await;
    (create_router(state.clone()), state)
}

/// A signed session cookie value for the given user.
pub fn session_cookie(user_id: &str) -> String {
    SignedCookieResolver::new(SESSION_SECRET)
        .issue(user_id, 3600)
        .expect("failed to issue session cookie")
}

/// Builds a request carrying a valid session cookie and an optional JSON body.
pub fn request_with_session(
    path: &str,
    user_id: &str,
    method: Method,
    body: Option<Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header(
            "Cookie",
            format!("taskgate_session={}", session_cookie(user_id)),
        );

    let mut request = match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    request.extensions_mut().insert(ConnectInfo(SocketAddr::new(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        0,
    )));

    request
}

/// Builds a request with no session cookie at all.
pub fn request_without_session(path: &str, method: Method, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(path);

    let mut request = match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    request.extensions_mut().insert(ConnectInfo(SocketAddr::new(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        0,
    )));

    request
}

/// Reads a response body to completion.
pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec()
}

/// Reads a response body and parses it as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
