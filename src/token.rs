//! Token Service
//!
//! Issues and verifies signed, time-bounded session tokens. The signing key
//! is process-wide configuration loaded once at startup; rotating it
//! invalidates every outstanding token, which is the accepted trade-off for
//! running without a revocation list.

use crate::error::AuthError;
use crate::models::SessionClaims;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Session token issuance and verification.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, lifetime_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs,
        }
    }

    /// Session lifetime in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Issue a signed token for the given account identity.
    pub fn issue(&self, account_id: Uuid, display_name: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = SessionClaims {
            sub: account_id,
            name: display_name.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token's signature and expiry.
    ///
    /// Every failure mode (tampering, wrong key, expiry, garbage input)
    /// collapses into `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_token_verifies_with_matching_claims() {
        let tokens = TokenService::new(SECRET, 36_000);
        let id = Uuid::new_v4();

        let token = tokens.issue(id, "Jane Agent").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.name, "Jane Agent");
        assert_eq!(claims.exp - claims.iat, 36_000);
    }

    #[test]
    fn expired_token_is_invalid() {
        // Negative lifetime puts exp in the past at issuance.
        let tokens = TokenService::new(SECRET, -120);
        let token = tokens.issue(Uuid::new_v4(), "Jane Agent").unwrap();

        assert!(matches!(
            tokens.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn token_signed_with_other_key_is_invalid() {
        let issuer = TokenService::new("ffffffffffffffffffffffffffffffff", 36_000);
        let verifier = TokenService::new(SECRET, 36_000);

        let token = issuer.issue(Uuid::new_v4(), "Jane Agent").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let tokens = TokenService::new(SECRET, 36_000);
        assert!(matches!(
            tokens.verify("not.a.jwt"),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(tokens.verify(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let tokens = TokenService::new(SECRET, 36_000);
        let mut token = tokens.issue(Uuid::new_v4(), "Jane Agent").unwrap();
        token.pop();
        token.push('A');

        assert!(matches!(
            tokens.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }
}
