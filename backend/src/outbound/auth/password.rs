//! Argon2id-backed `CredentialHasher` adapter.
//!
//! Hashes raw credentials into PHC strings and verifies presented
//! credentials in constant time via the `argon2` crate.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// `CredentialHasher` adapter backed by Argon2id with default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, credential: &str) -> Result<String, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(credential.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialHashError::hash(err.to_string()))
    }

    fn verify(&self, credential: &str, credential_hash: &str) -> Result<bool, CredentialHashError> {
        let parsed = PasswordHash::new(credential_hash)
            .map_err(|err| CredentialHashError::verify(err.to_string()))?;
        match Argon2::default().verify_password(credential.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHashError::verify(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hasher = Argon2CredentialHasher;
        let hash = hasher.hash("1234").expect("hash credential");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("1234", &hash).expect("verify match"));
        assert!(!hasher.verify("4321", &hash).expect("verify mismatch"));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Argon2CredentialHasher;
        let first = hasher.hash("1234").expect("hash credential");
        let second = hasher.hash("1234").expect("hash credential");

        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hashes_error_rather_than_mismatch() {
        let hasher = Argon2CredentialHasher;
        assert!(hasher.verify("1234", "not-a-phc-string").is_err());
    }
}
