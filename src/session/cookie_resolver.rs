use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::session::{Session, SessionResolver};

#[derive(Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Resolves sessions from a signed (HS256) session token carried in the
/// session cookie. The subject claim is the user id.
pub struct SignedCookieResolver {
    secret: String,
}

impl SignedCookieResolver {
    pub fn new(secret: &str) -> Self {
        SignedCookieResolver {
            secret: secret.to_string(),
        }
    }

    /// Issues a signed session token for a user, expiring after `exp_secs`.
    pub fn issue(&self, user_id: &str, exp_secs: i64) -> Result<String, String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + exp_secs,
        };
        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| format!("failed to encode session token: {}", e))
    }
}

#[async_trait::async_trait]
impl SessionResolver for SignedCookieResolver {
    fn get_name(&self) -> &str {
        "signed-cookie"
    }

    async fn resolve(&self, cookie_value: &str) -> Result<Session, String> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let decoded = decode::<SessionClaims>(cookie_value, &decoding_key, &Validation::default())
            .map_err(|e| format!("failed to verify session token: {}", e))?;

        Ok(Session {
            user_id: decoded.claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that an issued token resolves back to the same user.
    #[tokio::test]
    async fn test_issue_and_resolve() {
        let resolver = SignedCookieResolver::new("session-secret");
        let token = resolver.issue("alice", 3600).expect("issue should succeed");
        let session = resolver.resolve(&token).await.expect("should resolve");
        assert_eq!(session.user_id, "alice");
    }

    /// Test that a token signed with a different secret is rejected.
    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let issuer = SignedCookieResolver::new("secret-a");
        let verifier = SignedCookieResolver::new("secret-b");
        let token = issuer.issue("alice", 3600).expect("issue should succeed");
        assert!(verifier.resolve(&token).await.is_err());
    }

    /// Test that an expired token is rejected.
    #[tokio::test]
    async fn test_expired_token_rejected() {
        let resolver = SignedCookieResolver::new("session-secret");
        let token = resolver.issue("alice", -120).expect("issue should succeed");
        assert!(resolver.resolve(&token).await.is_err());
    }
}
