//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure, which keeps HTTP handler tests deterministic.

use async_trait::async_trait;

use super::token_service::TokenPair;
use crate::domain::{Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return a fresh token pair.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<TokenPair, Error>;
}

/// In-memory authenticator for handler tests.
///
/// `admin` / `password` authenticates successfully and produces fixed
/// tokens; everything else fails with the login error contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<TokenPair, Error> {
        if credentials.handle() == "admin" && credentials.credential() == "password" {
            Ok(TokenPair {
                access: "fixture-access".to_owned(),
                refresh: "fixture-refresh".to_owned(),
            })
        } else {
            Err(Error::unauthorized(
                "No active account found with the given credentials",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "password", true)]
    #[case("admin", "wrong", false)]
    #[case("other", "password", false)]
    #[tokio::test]
    async fn fixture_login_service_matches_only_fixture_credentials(
        #[case] handle: &str,
        #[case] credential: &str,
        #[case] should_succeed: bool,
    ) {
        let service = FixtureLoginService;
        let creds = LoginCredentials::try_from_parts(handle, credential).expect("credential shape");
        let result = service.authenticate(&creds).await;
        match (should_succeed, result) {
            (true, Ok(pair)) => assert_eq!(pair.access, "fixture-access"),
            (false, Err(err)) => {
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(
                    err.message(),
                    "No active account found with the given credentials"
                );
            }
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(_)) => panic!("expected failure, got success"),
        }
    }
}
