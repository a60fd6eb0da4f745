//! Bearer-token authentication extractor.
//!
//! Handlers that require authentication take an [`AuthenticatedActor`]
//! parameter; extraction reads the `Authorization: Bearer` header, verifies
//! the token through the [`TokenService`] port in [`HttpState`], and yields
//! the actor the claims describe. Failures surface as 401 responses with
//! `{"detail": "..."}` bodies.
//!
//! [`TokenService`]: crate::domain::ports::TokenService

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};

use crate::domain::ports::TokenServiceError;
use crate::domain::{Actor, Error};
use crate::inbound::http::state::HttpState;

/// Detail message when no credentials accompany the request.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Authentication credentials were not provided.";
/// Detail message when the presented token fails verification.
pub const INVALID_TOKEN_MESSAGE: &str = "Given token not valid for any token type";
/// Detail message when the presented token has expired.
pub const EXPIRED_TOKEN_MESSAGE: &str = "Token has expired";

/// Actor extracted from a verified bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedActor(pub Actor);

fn extract_actor(req: &HttpRequest) -> Result<AuthenticatedActor, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized(MISSING_CREDENTIALS_MESSAGE))?
        .to_str()
        .map_err(|_| Error::unauthorized(INVALID_TOKEN_MESSAGE))?;
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized(MISSING_CREDENTIALS_MESSAGE))?;

    let actor = state.tokens.verify(token).map_err(|err| match err {
        TokenServiceError::ExpiredToken => Error::unauthorized(EXPIRED_TOKEN_MESSAGE),
        _ => Error::unauthorized(INVALID_TOKEN_MESSAGE),
    })?;
    Ok(AuthenticatedActor(actor))
}

impl FromRequest for AuthenticatedActor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_actor(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{bearer, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, get, test as actix_test};
    use rstest::rstest;
    use uuid::Uuid;

    #[get("/whoami")]
    async fn whoami(actor: AuthenticatedActor) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "superuser": actor.0.is_superuser }))
    }

    async fn call(authorization: Option<&str>) -> (StatusCode, serde_json::Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(whoami),
        )
        .await;

        let mut request = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = authorization {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[actix_web::test]
    async fn missing_header_yields_401_with_detail() {
        let (status, body) = call(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body.get("detail").and_then(serde_json::Value::as_str),
            Some(MISSING_CREDENTIALS_MESSAGE)
        );
    }

    #[rstest]
    #[case("Token abc")]
    #[case("Bearer not-a-fixture-token")]
    #[actix_web::test]
    async fn malformed_tokens_yield_401(#[case] header_value: &str) {
        let (status, _body) = call(Some(header_value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn expired_tokens_yield_401_with_expiry_detail() {
        let (status, body) = call(Some("Bearer expired")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body.get("detail").and_then(serde_json::Value::as_str),
            Some(EXPIRED_TOKEN_MESSAGE)
        );
    }

    #[actix_web::test]
    async fn valid_tokens_yield_the_claimed_actor() {
        let token = bearer(Actor::new(Uuid::new_v4(), true));
        let (status, body) = call(Some(token.as_str())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.get("superuser").and_then(serde_json::Value::as_bool),
            Some(true)
        );
    }
}
