//! Signed-token issuance: an HS256 access/refresh pair with a separate
//! symmetric secret and TTL per token type.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::error::Result;

/// `iss` claim stamped into every issued token.
pub const ISSUER: &str = "aula";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Access and refresh token issued together after successful verification.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
struct TokenKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKey {
    fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl,
        }
    }
}

#[derive(Clone)]
pub struct TokenIssuer {
    access: TokenKey,
    refresh: TokenKey,
    issuer: String,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(
        access_secret: &SecretString,
        access_ttl: Duration,
        refresh_secret: &SecretString,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: TokenKey::new(access_secret, access_ttl),
            refresh: TokenKey::new(refresh_secret, refresh_ttl),
            issuer: ISSUER.to_string(),
        }
    }

    /// Issue the access/refresh pair for a verified user id.
    ///
    /// # Errors
    ///
    /// Fails only when signing fails.
    pub fn issue_pair(&self, user_id: &str) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.sign(&self.access, user_id)?,
            refresh_token: self.sign(&self.refresh, user_id)?,
        })
    }

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns an error for a bad signature, expired token, or wrong issuer.
    pub fn verify_access(&self, token: &str) -> Result<Claims> {
        Self::verify(&self.access, &self.issuer, token)
    }

    /// Validate a refresh token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns an error for a bad signature, expired token, or wrong issuer.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims> {
        Self::verify(&self.refresh, &self.issuer, token)
    }

    fn sign(&self, key: &TokenKey, user_id: &str) -> Result<String> {
        let now = unix_now();
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user_id.to_string(),
            exp: now + i64::try_from(key.ttl.as_secs()).unwrap_or(0),
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(&Header::default(), &claims, &key.encoding)?)
    }

    fn verify(key: &TokenKey, issuer: &str, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[issuer]);

        Ok(decode::<Claims>(token, &key.decoding, &validation)?.claims)
    }
}

fn unix_now() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            &SecretString::from("access_secret".to_string()),
            Duration::from_secs(60),
            &SecretString::from("refresh_secret".to_string()),
            Duration::from_secs(3600),
        )
    }

    #[test]
    fn test_issue_and_verify_pair() {
        let tokens = issuer();
        let pair = tokens.issue_pair("u1").unwrap();

        let access = tokens.verify_access(&pair.access_token).unwrap();
        assert_eq!(access.sub, "u1");
        assert_eq!(access.iss, ISSUER);
        assert!(!access.jti.is_empty());

        let refresh = tokens.verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh.sub, "u1");
    }

    #[test]
    fn test_tokens_are_independent() {
        let tokens = issuer();
        let pair = tokens.issue_pair("u1").unwrap();

        assert_ne!(pair.access_token, pair.refresh_token);
        // Each token only verifies against its own secret.
        assert!(tokens.verify_access(&pair.refresh_token).is_err());
        assert!(tokens.verify_refresh(&pair.access_token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = issuer().issue_pair("u1").unwrap();

        let other = TokenIssuer::new(
            &SecretString::from("different".to_string()),
            Duration::from_secs(60),
            &SecretString::from("different".to_string()),
            Duration::from_secs(3600),
        );
        assert!(other.verify_access(&pair.access_token).is_err());
    }

    #[test]
    fn test_expiry_window_matches_ttl() {
        let tokens = issuer();
        let pair = tokens.issue_pair("u1").unwrap();
        let claims = tokens.verify_access(&pair.access_token).unwrap();

        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(issuer().verify_access("not-a-token").is_err());
    }
}
