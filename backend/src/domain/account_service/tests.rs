//! Unit coverage for registration and authentication flows.

use super::*;
use crate::domain::ports::{
    AccountCredentials, FixtureCredentialHasher, FixtureTokenService, MockAccountRepository,
    MockCredentialHasher, MockTokenService,
};
use crate::domain::{ErrorCode, Handle};
use rstest::rstest;
use serde_json::Value;

type Service<R = MockAccountRepository, H = FixtureCredentialHasher, T = FixtureTokenService> =
    AccountService<R, H, T>;

fn service(repository: MockAccountRepository) -> Service {
    AccountService::new(
        Arc::new(repository),
        Arc::new(FixtureCredentialHasher),
        Arc::new(FixtureTokenService),
    )
}

fn request(handle: &str, email: &str, credential: &str, is_superuser: bool) -> RegistrationRequest {
    RegistrationRequest {
        handle: Some(handle.to_owned()),
        email: Some(email.to_owned()),
        credential: Some(credential.to_owned()),
        is_superuser,
    }
}

fn stored_account(handle: &str, email: &str, is_superuser: bool) -> AccountCredentials {
    let account = Account::new(
        Uuid::new_v4(),
        Handle::new(handle).expect("handle"),
        EmailAddress::new(email).expect("email"),
        is_superuser,
    );
    AccountCredentials {
        account,
        credential_hash: "fixture$1234".to_owned(),
    }
}

fn field_messages<'a>(error: &'a Error, field: &str) -> Option<&'a Value> {
    error.details()?.get("fields")?.get(field)
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn register_persists_account_and_hides_credential(#[case] is_superuser: bool) {
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_handle()
        .times(1)
        .return_once(|_| Ok(None));
    repository
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repository
        .expect_insert()
        .withf(|account, hash| {
            account.handle().as_ref() == "bob"
                && account.email().as_ref() == "bob@kenzie.com.br"
                && hash == "fixture$1234"
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let created = service(repository)
        .register(request("bob", "bob@kenzie.com.br", "1234", is_superuser))
        .await
        .expect("registration succeeds");

    assert_eq!(created.handle, "bob");
    assert_eq!(created.email, "bob@kenzie.com.br");
    assert_eq!(created.is_superuser, is_superuser);
    let rendered = serde_json::to_value(&created).expect("serialize response");
    assert!(rendered.get("credential").is_none());
    assert!(rendered.get("credential_hash").is_none());
}

#[tokio::test]
async fn register_aggregates_all_missing_fields() {
    let repository = MockAccountRepository::new();

    let error = service(repository)
        .register(RegistrationRequest::default())
        .await
        .expect_err("empty payload fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    for field in ["handle", "email", "credential"] {
        let messages = field_messages(&error, field).expect("field present");
        assert_eq!(messages, &serde_json::json!(["This field is required."]));
    }
}

#[tokio::test]
async fn register_reports_handle_and_email_collisions_together() {
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_handle()
        .times(1)
        .return_once(|_| Ok(Some(stored_account("bob", "bob@kenzie.com.br", false))));
    repository
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(stored_account("bob", "bob@kenzie.com.br", false).account)));
    repository.expect_insert().times(0);

    let error = service(repository)
        .register(request("bob", "bob@kenzie.com.br", "1234", false))
        .await
        .expect_err("duplicate registration fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert!(field_messages(&error, "handle").is_some());
    assert!(field_messages(&error, "email").is_some());
}

#[tokio::test]
async fn register_maps_insert_race_to_field_error() {
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_handle()
        .times(1)
        .return_once(|_| Ok(None));
    repository
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repository
        .expect_insert()
        .times(1)
        .return_once(|_, _| Err(AccountPersistenceError::DuplicateHandle));

    let error = service(repository)
        .register(request("bob", "bob@kenzie.com.br", "1234", false))
        .await
        .expect_err("insert race fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert!(field_messages(&error, "handle").is_some());
}

#[tokio::test]
async fn register_rejects_invalid_handle_and_email_shapes() {
    let repository = MockAccountRepository::new();

    let error = service(repository)
        .register(request("bob the builder", "not-an-email", "1234", false))
        .await
        .expect_err("invalid shapes fail");

    assert_eq!(
        field_messages(&error, "handle"),
        Some(&serde_json::json!(["Enter a valid handle."]))
    );
    assert_eq!(
        field_messages(&error, "email"),
        Some(&serde_json::json!(["Enter a valid email address."]))
    );
}

#[tokio::test]
async fn register_surfaces_connection_failures_as_service_unavailable() {
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_handle()
        .times(1)
        .return_once(|_| Err(AccountPersistenceError::connection("refused")));

    let error = service(repository)
        .register(request("bob", "bob@kenzie.com.br", "1234", false))
        .await
        .expect_err("connection failure surfaces");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn authenticate_issues_tokens_carrying_the_superuser_flag() {
    let stored = stored_account("bob", "bob@kenzie.com.br", true);
    let account_id = stored.account.id();
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_handle()
        .withf(|handle| handle == "bob")
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let credentials = LoginCredentials::try_from_parts("bob", "1234").expect("credentials");
    let pair = service(repository)
        .authenticate(&credentials)
        .await
        .expect("authentication succeeds");

    // FixtureTokenService encodes the role and id into the access token.
    assert_eq!(pair.access, format!("super:{account_id}"));
}

#[tokio::test]
async fn authenticate_rejects_unknown_handles_with_contract_message() {
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_handle()
        .times(1)
        .return_once(|_| Ok(None));

    let credentials = LoginCredentials::try_from_parts("ghost", "1234").expect("credentials");
    let error = service(repository)
        .authenticate(&credentials)
        .await
        .expect_err("unknown handle fails");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), LOGIN_FAILED_MESSAGE);
}

#[tokio::test]
async fn authenticate_rejects_wrong_credentials_with_contract_message() {
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_handle()
        .times(1)
        .return_once(|_| Ok(Some(stored_account("bob", "bob@kenzie.com.br", false))));

    let credentials = LoginCredentials::try_from_parts("bob", "wrong").expect("credentials");
    let error = service(repository)
        .authenticate(&credentials)
        .await
        .expect_err("wrong credential fails");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), LOGIN_FAILED_MESSAGE);
}

#[tokio::test]
async fn authenticate_maps_hasher_failures_to_internal_errors() {
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_handle()
        .times(1)
        .return_once(|_| Ok(Some(stored_account("bob", "bob@kenzie.com.br", false))));

    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_verify()
        .times(1)
        .return_once(|_, _| Err(CredentialHashError::verify("corrupt hash")));

    let service: AccountService<_, _, MockTokenService> = AccountService::new(
        Arc::new(repository),
        Arc::new(hasher),
        Arc::new(MockTokenService::new()),
    );

    let credentials = LoginCredentials::try_from_parts("bob", "1234").expect("credentials");
    let error = service
        .authenticate(&credentials)
        .await
        .expect_err("hasher failure surfaces");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
