//! Port for the bearer-token collaborator.
//!
//! The domain never inspects token strings itself; it asks this port to
//! issue a pair for an authenticated actor and to verify presented tokens
//! back into an [`Actor`].

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Actor;

/// Errors raised by token service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenServiceError {
    /// Token issuance failed inside the adapter.
    #[error("token issuance failed: {message}")]
    Issue {
        /// Adapter-provided diagnostic.
        message: String,
    },
    /// The presented token is malformed or has a bad signature.
    #[error("token is invalid")]
    InvalidToken,
    /// The presented token has expired.
    #[error("token has expired")]
    ExpiredToken,
}

impl TokenServiceError {
    /// Create an issuance error with the given message.
    pub fn issue(message: impl Into<String>) -> Self {
        Self::Issue {
            message: message.into(),
        }
    }
}

/// Access/refresh token pair returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access: String,
    /// Longer-lived refresh token.
    pub refresh: String,
}

/// Port for issuing and verifying bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue an access/refresh pair carrying the actor's id and superuser
    /// flag as claims.
    fn issue(&self, actor: Actor) -> Result<TokenPair, TokenServiceError>;

    /// Verify a presented access token and recover the actor it names.
    fn verify(&self, token: &str) -> Result<Actor, TokenServiceError>;
}

/// Deterministic token service for tests.
///
/// Issued tokens embed the actor id; verification accepts tokens of the
/// form `super:<uuid>` and `user:<uuid>`, and treats the literal string
/// `expired` as an expired token.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenService;

impl TokenService for FixtureTokenService {
    fn issue(&self, actor: Actor) -> Result<TokenPair, TokenServiceError> {
        let role = if actor.is_superuser { "super" } else { "user" };
        Ok(TokenPair {
            access: format!("{role}:{}", actor.id),
            refresh: format!("refresh-{role}:{}", actor.id),
        })
    }

    fn verify(&self, token: &str) -> Result<Actor, TokenServiceError> {
        if token == "expired" {
            return Err(TokenServiceError::ExpiredToken);
        }
        let (role, id) = token
            .split_once(':')
            .ok_or(TokenServiceError::InvalidToken)?;
        let id = Uuid::parse_str(id).map_err(|_| TokenServiceError::InvalidToken)?;
        match role {
            "super" => Ok(Actor::new(id, true)),
            "user" => Ok(Actor::new(id, false)),
            _ => Err(TokenServiceError::InvalidToken),
        }
    }
}
