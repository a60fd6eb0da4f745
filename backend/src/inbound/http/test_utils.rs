//! Shared helpers for HTTP handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    ContentsCommand, ContentsQuery, CourseRoster, CourseView, CoursesCommand, CoursesQuery,
    CreateContentRequest, CreateCourseRequest, EnrollmentAdmin, FixtureTokenService, LoginService,
    Registration, RegisteredAccount, RegistrationRequest, StudentEmail, TokenPair, TokenService,
    UpdateContentRequest, UpdateCourseRequest,
};
use crate::domain::{Actor, Content, Error, LoginCredentials};
use crate::inbound::http::state::HttpState;

/// Port stand-in for dependencies a test never exercises.
///
/// Every method fails with an internal error so an unexpected call shows up
/// as a 500 in the test instead of silently succeeding.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnusedPort;

fn unused() -> Error {
    Error::internal("port not wired in this test")
}

#[async_trait]
impl Registration for UnusedPort {
    async fn register(&self, _request: RegistrationRequest) -> Result<RegisteredAccount, Error> {
        Err(unused())
    }
}

#[async_trait]
impl LoginService for UnusedPort {
    async fn authenticate(&self, _credentials: &LoginCredentials) -> Result<TokenPair, Error> {
        Err(unused())
    }
}

#[async_trait]
impl CoursesQuery for UnusedPort {
    async fn list(&self, _actor: Actor) -> Result<Vec<CourseView>, Error> {
        Err(unused())
    }

    async fn retrieve(&self, _actor: Actor, _course_id: Uuid) -> Result<CourseView, Error> {
        Err(unused())
    }
}

#[async_trait]
impl CoursesCommand for UnusedPort {
    async fn create(
        &self,
        _actor: Actor,
        _request: CreateCourseRequest,
    ) -> Result<CourseView, Error> {
        Err(unused())
    }

    async fn update(
        &self,
        _actor: Actor,
        _course_id: Uuid,
        _request: UpdateCourseRequest,
    ) -> Result<CourseView, Error> {
        Err(unused())
    }

    async fn delete(&self, _actor: Actor, _course_id: Uuid) -> Result<(), Error> {
        Err(unused())
    }
}

#[async_trait]
impl ContentsQuery for UnusedPort {
    async fn retrieve(
        &self,
        _actor: Actor,
        _course_id: Uuid,
        _content_id: Uuid,
    ) -> Result<Content, Error> {
        Err(unused())
    }
}

#[async_trait]
impl ContentsCommand for UnusedPort {
    async fn create(
        &self,
        _actor: Actor,
        _course_id: Uuid,
        _request: CreateContentRequest,
    ) -> Result<Content, Error> {
        Err(unused())
    }

    async fn update(
        &self,
        _actor: Actor,
        _course_id: Uuid,
        _content_id: Uuid,
        _request: UpdateContentRequest,
    ) -> Result<Content, Error> {
        Err(unused())
    }

    async fn delete(&self, _actor: Actor, _course_id: Uuid, _content_id: Uuid) -> Result<(), Error> {
        Err(unused())
    }
}

#[async_trait]
impl EnrollmentAdmin for UnusedPort {
    async fn add_students(
        &self,
        _actor: Actor,
        _course_id: Uuid,
        _entries: Vec<StudentEmail>,
    ) -> Result<CourseRoster, Error> {
        Err(unused())
    }

    async fn roster(&self, _actor: Actor, _course_id: Uuid) -> Result<CourseRoster, Error> {
        Err(unused())
    }
}

/// Build an [`HttpState`] with unused ports and the fixture token service.
///
/// Tests replace the field under test with a mock or stub.
pub fn test_state() -> HttpState {
    HttpState {
        registration: Arc::new(UnusedPort),
        login: Arc::new(UnusedPort),
        courses_query: Arc::new(UnusedPort),
        courses_command: Arc::new(UnusedPort),
        contents_query: Arc::new(UnusedPort),
        contents_command: Arc::new(UnusedPort),
        enrollment: Arc::new(UnusedPort),
        tokens: Arc::new(FixtureTokenService),
    }
}

/// Render an `Authorization` header value the fixture token service accepts.
pub fn bearer(actor: Actor) -> String {
    let pair = FixtureTokenService
        .issue(actor)
        .expect("fixture issuance is infallible");
    format!("Bearer {}", pair.access)
}
