//! JWT-backed `TokenService` adapter.
//!
//! Issues HS256-signed access and refresh tokens whose claims carry the
//! account id and superuser flag, and verifies presented access tokens back
//! into domain actors. Refresh tokens are rejected by `verify`; token
//! refresh is handled by the external auth surface, not this core.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Actor;
use crate::domain::ports::{TokenPair, TokenService, TokenServiceError};

const ACCESS_KIND: &str = "access";
const REFRESH_KIND: &str = "refresh";

/// Signing configuration for [`JwtTokenService`].
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// HMAC secret used for signing and verification.
    pub secret: String,
    /// Issuer claim embedded in and required from every token.
    pub issuer: String,
    /// Access-token lifetime in seconds.
    pub access_ttl_secs: i64,
    /// Refresh-token lifetime in seconds.
    pub refresh_ttl_secs: i64,
}

impl JwtSettings {
    /// Create settings with the given secret and default lifetimes
    /// (15-minute access, 7-day refresh).
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: "backend".to_owned(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 86_400 * 7,
        }
    }
}

/// Claims embedded in issued tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    exp: i64,
    iat: i64,
    iss: String,
    jti: Uuid,
    kind: String,
    is_superuser: bool,
}

/// `TokenService` adapter backed by `jsonwebtoken`.
#[derive(Clone)]
pub struct JwtTokenService {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    /// Create a token service from signing settings.
    pub fn new(settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&settings.issuer]);
        validation.leeway = 30;
        Self {
            settings,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    fn sign(&self, actor: Actor, kind: &str, ttl_secs: i64) -> Result<String, TokenServiceError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: actor.id,
            exp: now + ttl_secs,
            iat: now,
            iss: self.settings.issuer.clone(),
            jti: Uuid::new_v4(),
            kind: kind.to_owned(),
            is_superuser: actor.is_superuser,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| TokenServiceError::issue(err.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, actor: Actor) -> Result<TokenPair, TokenServiceError> {
        Ok(TokenPair {
            access: self.sign(actor, ACCESS_KIND, self.settings.access_ttl_secs)?,
            refresh: self.sign(actor, REFRESH_KIND, self.settings.refresh_ttl_secs)?,
        })
    }

    fn verify(&self, token: &str) -> Result<Actor, TokenServiceError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    TokenServiceError::ExpiredToken
                }
                _ => TokenServiceError::InvalidToken,
            },
        )?;
        if data.claims.kind != ACCESS_KIND {
            return Err(TokenServiceError::InvalidToken);
        }
        Ok(Actor::new(data.claims.sub, data.claims.is_superuser))
    }
}
