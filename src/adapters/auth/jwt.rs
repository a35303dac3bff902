//! HS256 bearer tokens.
//!
//! Tokens carry the user id as `sub` plus `iat`/`exp`. Nothing else is
//! embedded: role and profile are always read from the user store.

use async_trait::async_trait;
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, IssuedToken, Timestamp, UserId};
use crate::ports::{SessionValidator, TokenIssuer};

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: String,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
}

/// Issues and validates signed bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    secret: SecretString,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: SecretString, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            Duration::hours(config.token_ttl_hours as i64),
        )
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key())
            .map_err(|e| AuthError::IssueFailed(e.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key(), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AuthError> {
        let issued_at = Timestamp::now();
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.unix_seconds(),
            exp: expires_at.unix_seconds(),
        };
        Ok(IssuedToken {
            token: self.encode_claims(&claims)?,
            expires_at,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?;
        let id: UserId = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        let expires_at = Timestamp::from_unix(claims.exp).ok_or(AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, expires_at))
    }
}
