//! Account data model and login credentials.
//!
//! Accounts carry the identity attributes exposed by the API. The credential
//! hash is deliberately absent from [`Account`]; only the persistence layer
//! ever sees it.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Maximum allowed length for an account handle.
pub const HANDLE_MAX: usize = 150;
/// Maximum allowed length for an account email address.
pub const EMAIL_MAX: usize = 100;

/// Validation errors raised by the account value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Handle was missing or blank once trimmed.
    EmptyHandle,
    /// Handle exceeded [`HANDLE_MAX`] characters.
    HandleTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Handle contained characters outside the permitted set.
    HandleInvalidCharacters,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email exceeded [`EMAIL_MAX`] characters.
    EmailTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Email did not look like an address.
    EmailInvalidFormat,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHandle => write!(f, "handle must not be empty"),
            Self::HandleTooLong { max } => {
                write!(f, "handle must be at most {max} characters")
            }
            Self::HandleInvalidCharacters => write!(
                f,
                "handle may only contain letters, numbers, and @/./+/-/_ characters",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => {
                write!(f, "email must be at most {max} characters")
            }
            Self::EmailInvalidFormat => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

static HANDLE_RE: OnceLock<Regex> = OnceLock::new();

fn handle_regex() -> &'static Regex {
    HANDLE_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[\w.@+-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("handle regex failed to compile: {error}"))
    })
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only; deliverability is not a domain concern.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique account handle used for login and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Validate and construct a [`Handle`] from owned input.
    pub fn new(handle: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(handle.into())
    }

    fn from_owned(handle: String) -> Result<Self, AccountValidationError> {
        if handle.trim().is_empty() {
            return Err(AccountValidationError::EmptyHandle);
        }
        if handle.chars().count() > HANDLE_MAX {
            return Err(AccountValidationError::HandleTooLong { max: HANDLE_MAX });
        }
        if !handle_regex().is_match(&handle) {
            return Err(AccountValidationError::HandleInvalidCharacters);
        }
        Ok(Self(handle))
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}

impl TryFrom<String> for Handle {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Unique account email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, AccountValidationError> {
        if email.trim().is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&email) {
            return Err(AccountValidationError::EmailInvalidFormat);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Registered account.
///
/// ## Invariants
/// - `handle` and `email` satisfy their value-type validation.
/// - The credential hash never appears on this type; persistence adapters
///   keep it in their own records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: Uuid,
    handle: Handle,
    email: EmailAddress,
    is_superuser: bool,
}

impl Account {
    /// Build an account from validated components.
    pub fn new(id: Uuid, handle: Handle, email: EmailAddress, is_superuser: bool) -> Self {
        Self {
            id,
            handle,
            email,
            is_superuser,
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique login handle.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Unique email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Whether the account holds unrestricted write access.
    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `handle` is trimmed and must not be empty after trimming.
/// - `credential` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    handle: String,
    credential: Zeroizing<String>,
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Handle was missing or blank once trimmed.
    EmptyHandle,
    /// Credential was blank.
    EmptyCredential,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHandle => write!(f, "handle must not be empty"),
            Self::EmptyCredential => write!(f, "credential must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl LoginCredentials {
    /// Construct credentials from raw handle/credential inputs.
    pub fn try_from_parts(handle: &str, credential: &str) -> Result<Self, LoginValidationError> {
        let normalized = handle.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyHandle);
        }
        if credential.is_empty() {
            return Err(LoginValidationError::EmptyCredential);
        }
        Ok(Self {
            handle: normalized.to_owned(),
            credential: Zeroizing::new(credential.to_owned()),
        })
    }

    /// Handle string suitable for account lookups.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Raw credential for hash verification.
    pub fn credential(&self) -> &str {
        &self.credential
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bob", true)]
    #[case("bob.builder+site@example", true)]
    #[case("", false)]
    #[case("   ", false)]
    #[case("bob the builder", false)]
    fn handle_validation(#[case] input: &str, #[case] accepted: bool) {
        assert_eq!(Handle::new(input).is_ok(), accepted);
    }

    #[rstest]
    fn handle_rejects_overlong_input() {
        let long = "h".repeat(HANDLE_MAX + 1);
        assert_eq!(
            Handle::new(long),
            Err(AccountValidationError::HandleTooLong { max: HANDLE_MAX })
        );
    }

    #[rstest]
    #[case("bob@example.com", true)]
    #[case("bob@kenzie.com.br", true)]
    #[case("", false)]
    #[case("not-an-email", false)]
    #[case("two@@example.com", false)]
    fn email_validation(#[case] input: &str, #[case] accepted: bool) {
        assert_eq!(EmailAddress::new(input).is_ok(), accepted);
    }

    #[rstest]
    fn email_rejects_overlong_input() {
        let long = format!("{}@example.com", "e".repeat(EMAIL_MAX));
        assert_eq!(
            EmailAddress::new(long),
            Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX })
        );
    }

    #[rstest]
    fn login_credentials_trim_handle_but_not_credential() {
        let creds = LoginCredentials::try_from_parts("  bob  ", " 1234 ").expect("valid parts");
        assert_eq!(creds.handle(), "bob");
        assert_eq!(creds.credential(), " 1234 ");
    }

    #[rstest]
    #[case("", "1234", LoginValidationError::EmptyHandle)]
    #[case("bob", "", LoginValidationError::EmptyCredential)]
    fn login_credentials_reject_blank_parts(
        #[case] handle: &str,
        #[case] credential: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(handle, credential),
            Err(expected)
        );
    }

    #[rstest]
    fn account_exposes_components() {
        let id = Uuid::new_v4();
        let account = Account::new(
            id,
            Handle::new("bob").expect("handle"),
            EmailAddress::new("bob@example.com").expect("email"),
            true,
        );
        assert_eq!(account.id(), id);
        assert_eq!(account.handle().as_ref(), "bob");
        assert_eq!(account.email().as_ref(), "bob@example.com");
        assert!(account.is_superuser());
    }
}
