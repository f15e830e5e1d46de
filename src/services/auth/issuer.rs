//! Token issuance (HS256).
//!
//! The server itself never issues tokens over HTTP (there is no user store
//! to authenticate against). Issuance exists for tests and for the
//! `token-gen` companion binary.

use jsonwebtoken::{EncodingKey, Header, errors::Error as JwtError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: String,
    pub created_at: i64,
    pub exp: i64,
}

/// Signs tokens for a subject UUID with a fixed TTL.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: i64,
}

impl TokenIssuer {
    /// `ttl_seconds` may be negative to mint an already-expired token, which
    /// tests and `token-gen` use to exercise the expiry path.
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    /// Issue a signed token asserting `user_id`.
    pub fn issue(&self, user_id: Uuid) -> Result<String, JwtError> {
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            id: user_id.to_string(),
            created_at: now,
            // saturate rather than overflow for absurd lifetimes
            exp: now.saturating_add(self.ttl_seconds),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::verifier::{TokenVerifier, VerifyError};

    const SECRET: &[u8] = b"test-secret-for-issuer-tests";

    #[test]
    fn issued_token_has_three_segments() {
        let token = TokenIssuer::new(SECRET, 600).issue(Uuid::new_v4()).unwrap();

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn issued_token_round_trips_through_the_verifier() {
        let user_id = Uuid::new_v4();
        let token = TokenIssuer::new(SECRET, 600).issue(user_id).unwrap();

        let principal = TokenVerifier::new(SECRET).verify(&token).unwrap();

        assert_eq!(principal.id(), user_id);
    }

    #[test]
    fn negative_ttl_issues_an_already_expired_token() {
        let token = TokenIssuer::new(SECRET, -600).issue(Uuid::new_v4()).unwrap();

        let err = TokenVerifier::new(SECRET).verify(&token).unwrap_err();

        assert_eq!(err, VerifyError::ExpiredToken);
    }

    // An overflowing `now + ttl` would wrap negative and read as expired.
    #[test]
    fn an_extreme_ttl_saturates_the_expiry() {
        let token = TokenIssuer::new(SECRET, i64::MAX)
            .issue(Uuid::new_v4())
            .unwrap();

        assert!(TokenVerifier::new(SECRET).verify(&token).is_ok());
    }
}
