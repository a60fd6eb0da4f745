//! Server assembly: route registration and port wiring.

pub mod config;

use std::sync::Arc;

use actix_web::{Scope, web};

use crate::domain::{AccountService, ContentService, CourseService, EnrollmentService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{accounts, contents, courses, students};
use crate::outbound::auth::{Argon2CredentialHasher, JwtSettings, JwtTokenService};
use crate::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselContentRepository, DieselCourseRepository,
    DieselEnrollmentRepository,
};

/// Build the `/api` scope with every REST endpoint registered.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(accounts::register)
        .service(accounts::login)
        .service(courses::list_courses)
        .service(courses::create_course)
        .service(contents::create_content)
        .service(contents::retrieve_content)
        .service(contents::update_content)
        .service(contents::delete_content)
        .service(students::roster)
        .service(students::add_students)
        .service(courses::retrieve_course)
        .service(courses::update_course)
        .service(courses::delete_course)
}

/// Wire the Diesel repositories and auth adapters into an [`HttpState`].
pub fn build_http_state(pool: DbPool, jwt: JwtSettings) -> HttpState {
    let accounts = Arc::new(DieselAccountRepository::new(pool.clone()));
    let courses = Arc::new(DieselCourseRepository::new(pool.clone()));
    let contents = Arc::new(DieselContentRepository::new(pool.clone()));
    let enrollments = Arc::new(DieselEnrollmentRepository::new(pool));
    let hasher = Arc::new(Argon2CredentialHasher);
    let tokens = Arc::new(JwtTokenService::new(jwt));

    let account_service = Arc::new(AccountService::new(
        accounts.clone(),
        hasher,
        tokens.clone(),
    ));
    let course_service = Arc::new(CourseService::new(
        courses.clone(),
        contents.clone(),
        enrollments.clone(),
    ));
    let content_service = Arc::new(ContentService::new(
        courses.clone(),
        contents,
        enrollments.clone(),
    ));
    let enrollment_service = Arc::new(EnrollmentService::new(accounts, courses, enrollments));

    HttpState {
        registration: account_service.clone(),
        login: account_service,
        courses_query: course_service.clone(),
        courses_command: course_service,
        contents_query: content_service.clone(),
        contents_command: content_service,
        enrollment: enrollment_service,
        tokens,
    }
}
