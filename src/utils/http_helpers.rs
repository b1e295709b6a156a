use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
/// The body is always `{"error": ...}` with an optional `"detail"` field.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// Attaches a detail string to the error body.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Converts our `HTTPError` into an HTTP response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.message });
        if let Some(detail) = self.detail {
            body["detail"] = Value::String(detail);
        }
        Response::builder()
            .status(self.status)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}

/// Builds a JSON response from an owned value, used by the fallback-store
/// handlers. Proxied responses relay the upstream bytes directly instead.
pub fn json_response(status: StatusCode, value: &Value) -> Response {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(value.to_string()))
        .unwrap()
}

/// Parses a numeric path identifier, rejecting malformed input with a 400.
pub fn parse_id(raw: &str, what: &str) -> Result<i64, HTTPError> {
    raw.parse::<i64>().map_err(|_| {
        HTTPError::new(StatusCode::BAD_REQUEST, format!("Invalid {}", what))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_numeric() {
        assert_eq!(parse_id("42", "task id").unwrap(), 42);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("forty-two", "task id").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
