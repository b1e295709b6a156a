//! Backend token minting.
//!
//! Every proxied call to the backend carries a short-lived bearer token
//! minted here for the resolved user. Tokens are created fresh per outbound
//! call and never cached or reused across requests.

use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

use crate::utils::http_helpers::HTTPError;

/// Errors from minting. A missing secret is a deployment problem, surfaced
/// as a 500 on the request that needed the token.
#[derive(Debug)]
pub enum MintError {
    MissingSecret,
    Encoding(String),
}

impl From<MintError> for HTTPError {
    fn from(e: MintError) -> Self {
        match e {
            MintError::MissingSecret => {
                tracing::error!("JWT secret is not configured; cannot mint backend token");
                HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
            }
            MintError::Encoding(msg) => {
                tracing::error!("Failed to encode backend token: {}", msg);
                HTTPError::new(StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
            }
        }
    }
}

#[derive(Serialize)]
struct BackendClaims<'a> {
    sub: &'a str,
    iat: i64,
    exp: i64,
}

/// Mints HS256 backend tokens with a subject claim and fixed expiry window.
pub struct TokenMinter {
    secret: Option<String>,
    exp_secs: i64,
}

impl TokenMinter {
    pub fn new(secret: Option<String>, exp_secs: i64) -> Self {
        TokenMinter { secret, exp_secs }
    }

    /// Produces a signed bearer token for the given user. CPU-bound only;
    /// no external calls.
    pub fn mint(&self, user_id: &str) -> Result<String, MintError> {
        let secret = self.secret.as_deref().ok_or(MintError::MissingSecret)?;

        let now = Utc::now().timestamp();
        let claims = BackendClaims {
            sub: user_id,
            iat: now,
            exp: now + self.exp_secs,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| MintError::Encoding(e.to_string()))
    }
}
