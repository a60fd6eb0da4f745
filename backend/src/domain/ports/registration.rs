//! Driving port for account registration.
//!
//! Inbound adapters call this to create accounts without knowing which
//! repository or hasher backs the flow.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;

/// Raw registration payload as received from the wire.
///
/// Fields are optional so the service can aggregate every missing-field
/// message in one validation response instead of failing fast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Requested unique handle.
    pub handle: Option<String>,
    /// Requested unique email.
    pub email: Option<String>,
    /// Raw credential; hashed before storage and never echoed.
    pub credential: Option<String>,
    /// Whether the new account holds unrestricted write access.
    pub is_superuser: bool,
}

/// Public view of a freshly registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegisteredAccount {
    /// Stable account identifier.
    pub id: Uuid,
    /// Unique handle.
    pub handle: String,
    /// Unique email.
    pub email: String,
    /// Unrestricted-write flag.
    pub is_superuser: bool,
}

/// Domain use-case port for registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Registration: Send + Sync {
    /// Validate and persist a new account.
    async fn register(&self, request: RegistrationRequest) -> Result<RegisteredAccount, Error>;
}
