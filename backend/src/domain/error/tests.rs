//! Regression coverage for the domain error type.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("nope"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("denied"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("clash"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_expected_codes(#[case] error: Error, #[case] code: ErrorCode) {
    assert_eq!(error.code(), code);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::NotFound, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn with_details_preserves_code_and_message() {
    let error = Error::invalid_request("validation failed")
        .with_details(json!({ "fields": { "name": ["This field is required."] } }));

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "validation failed");
    let fields = error
        .details()
        .and_then(|d| d.get("fields"))
        .expect("fields detail");
    assert!(fields.get("name").is_some());
}

#[rstest]
fn error_codes_serialize_as_snake_case() {
    let value = serde_json::to_value(ErrorCode::ServiceUnavailable).expect("serialize code");
    assert_eq!(value, json!("service_unavailable"));
}

#[rstest]
fn display_renders_the_message() {
    let error = Error::not_found("content not found.");
    assert_eq!(error.to_string(), "content not found.");
}
