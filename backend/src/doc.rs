//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer, the shared
//! response schemas, and the bearer-token security scheme. The generated
//! specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{RegisteredAccount, TokenPair};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::contents::ContentResponse;
use crate::inbound::http::courses::CourseResponse;
use crate::inbound::http::students::{CourseRosterResponse, EnrollmentResponse};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Course management API",
        description = "Role-based course management: accounts, courses, contents, and enrollments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::retrieve_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::contents::create_content,
        crate::inbound::http::contents::retrieve_content,
        crate::inbound::http::contents::update_content,
        crate::inbound::http::contents::delete_content,
        crate::inbound::http::students::roster,
        crate::inbound::http::students::add_students,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisteredAccount,
        TokenPair,
        CourseResponse,
        ContentResponse,
        EnrollmentResponse,
        CourseRosterResponse,
    )),
    tags(
        (name = "accounts", description = "Registration and login"),
        (name = "courses", description = "Course catalogue operations"),
        (name = "contents", description = "Course content operations"),
        (name = "students", description = "Roster management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn openapi_document_registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/accounts",
            "/api/login",
            "/api/courses",
            "/api/courses/{course_id}",
            "/api/courses/{course_id}/contents",
            "/api/courses/{course_id}/contents/{content_id}",
            "/api/courses/{course_id}/students",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn openapi_document_exposes_the_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
