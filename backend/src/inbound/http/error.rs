//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into the wire contract: per-field maps for
//! validation failures and `{"detail": "..."}` envelopes for everything
//! else.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::{Value, json};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render the wire body for a domain error.
///
/// Validation errors carry a `fields` detail which becomes the body
/// directly, matching the per-field map contract. Internal messages are
/// redacted so implementation details never leak to clients.
fn response_body(err: &Error) -> Value {
    if let Some(fields) = err.details().and_then(|details| details.get("fields")) {
        return fields.clone();
    }
    let detail = match err.code() {
        ErrorCode::InternalError | ErrorCode::ServiceUnavailable => "Internal server error",
        _ => err.message(),
    };
    json!({ "detail": detail })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(response_body(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldErrors;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("nope"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_contract_status(#[case] err: Error, #[case] status: StatusCode) {
        assert_eq!(err.status_code(), status);
    }

    #[rstest]
    fn validation_errors_render_the_field_map_directly() {
        let mut fields = FieldErrors::new();
        fields.push_required("name");
        let body = response_body(&fields.into_error());

        assert_eq!(body, json!({ "name": ["This field is required."] }));
    }

    #[rstest]
    fn other_errors_render_detail_envelopes() {
        let body = response_body(&Error::not_found("course not found."));
        assert_eq!(body, json!({ "detail": "course not found." }));
    }

    #[rstest]
    fn internal_details_are_redacted() {
        let body = response_body(&Error::internal("connection string leaked"));
        assert_eq!(body, json!({ "detail": "Internal server error" }));
    }
}
