//! Session tokens for reader accounts.
//!
//! Tokens are HS256 JWTs that carry the caller identity, so resolving a
//! request's user never touches the database.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::CallerIdentity;

const SECONDS_PER_HOUR: i64 = 3600;

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub nick_name: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    fn new(identity: &CallerIdentity, issued_at: i64, lifetime_hours: i64) -> Self {
        Self {
            sub: identity.user_id.to_string(),
            username: identity.username.clone(),
            nick_name: identity.nick_name.clone(),
            iat: issued_at,
            exp: issued_at + lifetime_hours * SECONDS_PER_HOUR,
        }
    }

    fn identity(&self) -> AppResult<CallerIdentity> {
        let user_id = self.sub.parse::<i64>().map_err(|_| AppError::Unauthorized {
            message: "Invalid token subject".to_string(),
        })?;
        Ok(CallerIdentity {
            user_id,
            username: self.username.clone(),
            nick_name: self.nick_name.clone(),
        })
    }
}

fn now_seconds() -> i64 {
    jiff::Timestamp::now().as_second()
}

/// Issues, decodes and refreshes session tokens.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration_hours: i64,
    refresh_grace_hours: i64,
}

impl JwtTokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            expiration_hours: config.token_expiration,
            refresh_grace_hours: config.refresh_grace,
        }
    }

    /// Mints a token for `identity` valid for the configured lifetime.
    pub fn issue(&self, identity: &CallerIdentity) -> AppResult<String> {
        self.sign(&Claims::new(identity, now_seconds(), self.expiration_hours))
    }

    /// Decodes a token, rejecting bad signatures, malformed input and expiry.
    pub fn decode(&self, token: &str) -> AppResult<CallerIdentity> {
        self.verify(token, true)?.identity()
    }

    /// True when the signature checks out and `now < exp + refresh_grace`.
    pub fn is_refreshable(&self, token: &str) -> bool {
        self.verify(token, false)
            .map(|claims| now_seconds() < claims.exp + self.refresh_grace_hours * SECONDS_PER_HOUR)
            .unwrap_or(false)
    }

    /// Re-issues a refreshable token with fresh `iat`/`exp` and the same identity.
    pub fn refresh(&self, token: &str) -> AppResult<(String, CallerIdentity)> {
        if !self.is_refreshable(token) {
            return Err(AppError::Unauthorized {
                message: "Token can no longer be refreshed".to_string(),
            });
        }
        let identity = self.verify(token, false)?.identity()?;
        let token = self.issue(&identity)?;
        Ok((token, identity))
    }

    fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| {
            AppError::Internal {
                source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
            }
        })
    }

    fn verify(&self, token: &str, check_expiry: bool) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = check_expiry;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
                    message: "Token has expired".to_string(),
                },
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
                    message: "Invalid token signature".to_string(),
                },
                _ => AppError::Unauthorized {
                    message: format!("Token validation failed: {}", e),
                },
            })
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("expiration_hours", &self.expiration_hours)
            .field("refresh_grace_hours", &self.refresh_grace_hours)
            .finish_non_exhaustive()
    }
}
