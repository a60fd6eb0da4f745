//! Port for credential hashing adapters.

/// Errors raised by credential hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialHashError {
    /// Hashing the raw credential failed.
    #[error("credential hashing failed: {message}")]
    Hash {
        /// Adapter-provided diagnostic.
        message: String,
    },
    /// The stored hash could not be parsed for verification.
    #[error("credential verification failed: {message}")]
    Verify {
        /// Adapter-provided diagnostic.
        message: String,
    },
}

impl CredentialHashError {
    /// Create a hashing error with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Create a verification error with the given message.
    pub fn verify(message: impl Into<String>) -> Self {
        Self::Verify {
            message: message.into(),
        }
    }
}

/// Port for hashing and verifying raw credentials.
///
/// Verification is constant-time inside the adapter; callers only learn
/// whether the credential matched.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a raw credential for storage.
    fn hash(&self, credential: &str) -> Result<String, CredentialHashError>;

    /// Check a raw credential against a stored hash.
    fn verify(&self, credential: &str, credential_hash: &str) -> Result<bool, CredentialHashError>;
}

/// Reversible stand-in hasher for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentialHasher;

impl CredentialHasher for FixtureCredentialHasher {
    fn hash(&self, credential: &str) -> Result<String, CredentialHashError> {
        Ok(format!("fixture${credential}"))
    }

    fn verify(&self, credential: &str, credential_hash: &str) -> Result<bool, CredentialHashError> {
        Ok(credential_hash == format!("fixture${credential}"))
    }
}
