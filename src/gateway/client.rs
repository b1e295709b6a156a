use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, Method, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::utils::http_helpers::HTTPError;

/// Client for the backend service. One instance is shared by all handlers;
/// each call attaches its own freshly minted bearer token.
pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    chat_timeout: Duration,
}

impl Gateway {
    pub fn new(base_url: String, timeout_secs: u64, chat_timeout_secs: u64) -> Self {
        Gateway {
            client: reqwest::Client::new(),
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            chat_timeout: Duration::from_secs(chat_timeout_secs),
        }
    }

    /// The budget for ordinary resource calls.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The budget for LLM-backed chat calls.
    pub fn chat_timeout(&self) -> Duration {
        self.chat_timeout
    }

    /// Forwards one request to the backend and relays the response.
    ///
    /// The inbound body travels unchanged (JSON and multipart alike) with
    /// its original content type; the caller's query string is appended
    /// verbatim. The call is attempted exactly once under the given timeout.
    /// Upstream 2xx responses are relayed verbatim; non-2xx responses keep
    /// their status with a normalized `{"error": ...}` body; transport
    /// failures and timeouts become a 500 with a generic message.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        bearer: &str,
        content_type: Option<&str>,
        body: Option<Bytes>,
        timeout: Duration,
    ) -> Result<Response, HTTPError> {
        let mut url = format!("{}{}", self.base_url, path);
        if let Some(q) = query {
            if !q.is_empty() {
                url.push('?');
                url.push_str(q);
            }
        }

        debug!("Forwarding {} {}", method, url);
        let mut request = self
            .client
            .request(method, &url)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
            .timeout(timeout);

        if let Some(bytes) = body {
            if let Some(ct) = content_type {
                request = request.header(header::CONTENT_TYPE, ct);
            }
            request = request.body(bytes);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!("Backend call to {} timed out after {:?}", url, timeout);
                return Err(HTTPError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Backend request timed out",
                ));
            }
            Err(e) => {
                error!("Backend call to {} failed: {}", url, e);
                return Err(HTTPError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Backend request failed",
                ));
            }
        };

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!("Failed to read backend response body: {}", e);
            HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Backend request failed")
        })?;

        if status == StatusCode::NO_CONTENT {
            return Ok(Response::builder()
                .status(status)
                .body(Body::empty())
                .unwrap());
        }

        if !status.is_success() {
            return Err(HTTPError::new(status, normalize_error(status, &bytes)));
        }

        Ok(Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .unwrap())
    }
}

/// Best-effort extraction of an upstream error message. The backend reports
/// errors as `{"detail": ...}`; anything unparseable gets a generic string.
fn normalize_error(status: StatusCode, bytes: &[u8]) -> String {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| format!("Backend request failed with status {}", status.as_u16()))
}
