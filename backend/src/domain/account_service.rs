//! Account registration and authentication services.
//!
//! Implements the [`Registration`] and [`LoginService`] driving ports on top
//! of the account repository, credential hasher, and token service ports.
//! Validation aggregates every failing field before uniqueness checks, and
//! handle/email collisions are reported together rather than fail-fast.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::account::{Account, AccountValidationError, EmailAddress, Handle};
use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, CredentialHashError, CredentialHasher,
    LoginService, Registration, RegisteredAccount, RegistrationRequest, TokenPair, TokenService,
    TokenServiceError,
};
use crate::domain::validation::FieldErrors;
use crate::domain::{Actor, Error, LoginCredentials};

/// Login failure detail mandated by the API contract.
pub const LOGIN_FAILED_MESSAGE: &str = "No active account found with the given credentials";

const DUPLICATE_HANDLE_MESSAGE: &str = "An account with that handle already exists.";
const DUPLICATE_EMAIL_MESSAGE: &str = "account with this email already exists.";

/// Account service implementing the registration and login driving ports.
#[derive(Clone)]
pub struct AccountService<R, H, T> {
    repository: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> AccountService<R, H, T> {
    /// Create a new service with the given collaborators.
    pub fn new(repository: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }
}

fn map_account_persistence_error(error: AccountPersistenceError) -> Error {
    match error {
        AccountPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountPersistenceError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountPersistenceError::DuplicateHandle => {
            let mut fields = FieldErrors::new();
            fields.push("handle", DUPLICATE_HANDLE_MESSAGE);
            fields.into_error()
        }
        AccountPersistenceError::DuplicateEmail => {
            let mut fields = FieldErrors::new();
            fields.push("email", DUPLICATE_EMAIL_MESSAGE);
            fields.into_error()
        }
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    Error::internal(format!("credential hashing failed: {error}"))
}

fn map_token_error(error: TokenServiceError) -> Error {
    Error::internal(format!("token issuance failed: {error}"))
}

fn handle_message(error: &AccountValidationError) -> String {
    match error {
        AccountValidationError::EmptyHandle => "This field is required.".to_owned(),
        AccountValidationError::HandleTooLong { max } => {
            format!("Ensure this field has no more than {max} characters.")
        }
        _ => "Enter a valid handle.".to_owned(),
    }
}

fn email_message(error: &AccountValidationError) -> String {
    match error {
        AccountValidationError::EmptyEmail => "This field is required.".to_owned(),
        AccountValidationError::EmailTooLong { max } => {
            format!("Ensure this field has no more than {max} characters.")
        }
        _ => "Enter a valid email address.".to_owned(),
    }
}

struct ValidatedRegistration {
    handle: Handle,
    email: EmailAddress,
    credential: String,
    is_superuser: bool,
}

fn validate_registration(request: RegistrationRequest) -> Result<ValidatedRegistration, Error> {
    let mut fields = FieldErrors::new();

    let handle = match request.handle.as_deref() {
        None | Some("") => {
            fields.push_required("handle");
            None
        }
        Some(raw) => match Handle::new(raw) {
            Ok(handle) => Some(handle),
            Err(err) => {
                fields.push("handle", handle_message(&err));
                None
            }
        },
    };

    let email = match request.email.as_deref() {
        None | Some("") => {
            fields.push_required("email");
            None
        }
        Some(raw) => match EmailAddress::new(raw) {
            Ok(email) => Some(email),
            Err(err) => {
                fields.push("email", email_message(&err));
                None
            }
        },
    };

    let credential = match request.credential {
        None => {
            fields.push_required("credential");
            None
        }
        Some(raw) if raw.is_empty() => {
            fields.push_required("credential");
            None
        }
        Some(raw) => Some(raw),
    };

    fields.into_result()?;

    match (handle, email, credential) {
        (Some(handle), Some(email), Some(credential)) => Ok(ValidatedRegistration {
            handle,
            email,
            credential,
            is_superuser: request.is_superuser,
        }),
        _ => Err(Error::internal("validation pass lost a field")),
    }
}

impl<R, H, T> AccountService<R, H, T>
where
    R: AccountRepository,
    H: CredentialHasher,
    T: TokenService,
{
    /// Report handle and email collisions together, mirroring the
    /// aggregated field-validation contract.
    async fn check_uniqueness(
        &self,
        handle: &Handle,
        email: &EmailAddress,
    ) -> Result<(), Error> {
        let mut fields = FieldErrors::new();

        let existing_handle = self
            .repository
            .find_by_handle(handle.as_ref())
            .await
            .map_err(map_account_persistence_error)?;
        if existing_handle.is_some() {
            fields.push("handle", DUPLICATE_HANDLE_MESSAGE);
        }

        let existing_email = self
            .repository
            .find_by_email(email.as_ref())
            .await
            .map_err(map_account_persistence_error)?;
        if existing_email.is_some() {
            fields.push("email", DUPLICATE_EMAIL_MESSAGE);
        }

        fields.into_result()
    }
}

#[async_trait]
impl<R, H, T> Registration for AccountService<R, H, T>
where
    R: AccountRepository,
    H: CredentialHasher,
    T: TokenService,
{
    async fn register(&self, request: RegistrationRequest) -> Result<RegisteredAccount, Error> {
        let validated = validate_registration(request)?;
        self.check_uniqueness(&validated.handle, &validated.email)
            .await?;

        let credential_hash = self
            .hasher
            .hash(&validated.credential)
            .map_err(map_hash_error)?;

        let account = Account::new(
            Uuid::new_v4(),
            validated.handle,
            validated.email,
            validated.is_superuser,
        );

        // A concurrent registration can still slip past the pre-checks; the
        // unique constraints surface it here as a duplicate error.
        self.repository
            .insert(&account, &credential_hash)
            .await
            .map_err(map_account_persistence_error)?;

        Ok(RegisteredAccount {
            id: account.id(),
            handle: account.handle().to_string(),
            email: account.email().to_string(),
            is_superuser: account.is_superuser(),
        })
    }
}

#[async_trait]
impl<R, H, T> LoginService for AccountService<R, H, T>
where
    R: AccountRepository,
    H: CredentialHasher,
    T: TokenService,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<TokenPair, Error> {
        let Some(stored) = self
            .repository
            .find_by_handle(credentials.handle())
            .await
            .map_err(map_account_persistence_error)?
        else {
            return Err(Error::unauthorized(LOGIN_FAILED_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.credential(), &stored.credential_hash)
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(LOGIN_FAILED_MESSAGE));
        }

        let actor = Actor::new(stored.account.id(), stored.account.is_superuser());
        self.tokens.issue(actor).map_err(map_token_error)
    }
}

#[cfg(test)]
mod tests;
