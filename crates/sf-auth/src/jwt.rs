//! JWT Bearer assertions.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::error::Result;

/// Lifetime of a bearer assertion.
pub const ASSERTION_LIFETIME_MINUTES: i64 = 3;

/// JWT claims for Salesforce OAuth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JwtClaims {
    /// Issuer (consumer key).
    pub iss: String,
    /// Subject (username).
    pub sub: String,
    /// Audience (login URL).
    pub aud: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl JwtClaims {
    /// Claims for `username` on behalf of `consumer_key`, expiring three minutes after `now`.
    pub fn new(consumer_key: &str, username: &str, domain: &str, now: DateTime<Utc>) -> Self {
        let exp = now + Duration::minutes(ASSERTION_LIFETIME_MINUTES);
        Self {
            iss: consumer_key.to_string(),
            sub: username.to_string(),
            aud: format!("https://{}.salesforce.com", domain),
            exp: exp.timestamp(),
        }
    }
}

/// Turns claims plus key material into a compact signed token.
pub trait AssertionSigner: Send + Sync {
    fn sign(&self, claims: &JwtClaims, key: &[u8]) -> Result<String>;
}

/// RS256 signer backed by `jsonwebtoken`. Expects a PEM-encoded RSA key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rs256Signer;

impl AssertionSigner for Rs256Signer {
    fn sign(&self, claims: &JwtClaims, key: &[u8]) -> Result<String> {
        let header = Header::new(Algorithm::RS256);
        let key = EncodingKey::from_rsa_pem(key)?;
        Ok(encode(&header, claims, &key)?)
    }
}
