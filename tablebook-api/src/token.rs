//! Stateless session tokens: HS256 JWTs carrying the customer id and an
//! expiry. Nothing is stored server-side, so tokens cannot be revoked early.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Signing secret must not be empty")]
    MissingSecret,
    #[error("Token encoding failed: {0}")]
    Encoding(String),
    #[error("Invalid token: {0}")]
    Invalid(String),
    #[error("Token expired")]
    Expired,
    #[error("Token lifetime must be between 1 and {max} seconds, got {0}", max = MAX_TTL_SECONDS)]
    InvalidLifetime(u64),
}

/// Roughly a century; longer lifetimes overflow timestamp arithmetic.
pub const MAX_TTL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_seconds: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        if ttl_seconds == 0 || ttl_seconds > MAX_TTL_SECONDS {
            return Err(TokenError::InvalidLifetime(ttl_seconds));
        }
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or(TokenError::InvalidLifetime(ttl_seconds))?;

        // Expiry is checked in `verify_at` against the caller's clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn issue(&self, customer_id: i32) -> Result<String, TokenError> {
        self.issue_at(customer_id, Utc::now())
    }

    pub fn issue_at(&self, customer_id: i32, now: DateTime<Utc>) -> Result<String, TokenError> {
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Encoding("expiry out of range".to_string()))?;
        let claims = SessionClaims {
            sub: customer_id.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<i32, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<i32, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        data.claims.sub.parse::<i32>().map_err(|_| {
            TokenError::Invalid(format!("subject {:?} is not a customer id", data.claims.sub))
        })
    }
}
