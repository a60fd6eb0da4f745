//! Account API handlers.
//!
//! ```text
//! POST /api/accounts {"handle":"bob","email":"bob@example.com","credential":"1234","is_superuser":false}
//! POST /api/login {"handle":"bob","credential":"1234"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{RegistrationRequest, TokenPair};
use crate::domain::{Error, FieldErrors, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/accounts`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterBody {
    /// Requested unique handle.
    pub handle: Option<String>,
    /// Requested unique email.
    pub email: Option<String>,
    /// Raw credential; never echoed back.
    pub credential: Option<String>,
    /// Whether the account is created with unrestricted write access.
    #[serde(default)]
    pub is_superuser: bool,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/accounts",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Per-field validation errors"),
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/accounts")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let created = state
        .registration
        .register(RegistrationRequest {
            handle: body.handle,
            email: body.email,
            credential: body.credential,
            is_superuser: body.is_superuser,
        })
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginBody {
    /// Account handle.
    pub handle: Option<String>,
    /// Raw credential.
    pub credential: Option<String>,
}

fn parse_login(body: LoginBody) -> Result<LoginCredentials, Error> {
    let mut fields = FieldErrors::new();
    if body.handle.as_deref().is_none_or(str::is_empty) {
        fields.push_required("handle");
    }
    if body.credential.as_deref().is_none_or(str::is_empty) {
        fields.push_required("credential");
    }
    fields.into_result()?;

    let (Some(handle), Some(credential)) = (body.handle, body.credential) else {
        return Err(Error::internal("validation pass lost a field"));
    };
    LoginCredentials::try_from_parts(&handle, &credential).map_err(|err| {
        let mut fields = FieldErrors::new();
        match err {
            LoginValidationError::EmptyHandle => fields.push_required("handle"),
            LoginValidationError::EmptyCredential => fields.push_required("credential"),
        }
        fields.into_error()
    })
}

/// Authenticate and obtain an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Token pair", body = TokenPair),
        (status = 400, description = "Per-field validation errors"),
        (status = 401, description = "Unknown account or wrong credential"),
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<TokenPair>> {
    let credentials = parse_login(payload.into_inner())?;
    let pair = state.login.authenticate(&credentials).await?;
    Ok(web::Json(pair))
}
