//! Port for account persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Account;

/// Persistence errors raised by account repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountPersistenceError {
    /// Repository connection could not be established.
    #[error("account repository connection failed: {message}")]
    Connection {
        /// Adapter-provided diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("account repository query failed: {message}")]
    Query {
        /// Adapter-provided diagnostic.
        message: String,
    },
    /// Insert collided with the unique handle constraint.
    #[error("an account with that handle already exists")]
    DuplicateHandle,
    /// Insert collided with the unique email constraint.
    #[error("an account with that email already exists")]
    DuplicateEmail,
}

impl AccountPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Account row joined with its stored credential hash.
///
/// Only authentication reads this; everything else works with [`Account`],
/// which has no credential field to leak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    /// Public account attributes.
    pub account: Account,
    /// Stored Argon2id PHC string.
    pub credential_hash: String,
}

/// Port for account storage and lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account together with its credential hash.
    async fn insert(
        &self,
        account: &Account,
        credential_hash: &str,
    ) -> Result<(), AccountPersistenceError>;

    /// Fetch an account and its credential hash by exact handle.
    async fn find_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<AccountCredentials>, AccountPersistenceError>;

    /// Fetch an account by exact email.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<Account>, AccountPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn error_constructors_format_messages() {
        assert_eq!(
            AccountPersistenceError::connection("refused").to_string(),
            "account repository connection failed: refused"
        );
        assert_eq!(
            AccountPersistenceError::query("syntax").to_string(),
            "account repository query failed: syntax"
        );
    }

    #[rstest]
    fn duplicate_variants_have_stable_messages() {
        assert_eq!(
            AccountPersistenceError::DuplicateHandle.to_string(),
            "an account with that handle already exists"
        );
        assert_eq!(
            AccountPersistenceError::DuplicateEmail.to_string(),
            "an account with that email already exists"
        );
    }
}
