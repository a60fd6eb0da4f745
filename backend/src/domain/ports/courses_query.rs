//! Driving port for course reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, Content, Course, CourseEnrollment, Error};

/// Course joined with the children its API representation embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseView {
    /// Course attributes.
    pub course: Course,
    /// Contents owned by the course.
    pub contents: Vec<Content>,
    /// Enrollments with projected student attributes.
    pub enrollments: Vec<CourseEnrollment>,
}

/// Domain use-case port for listing and retrieving courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesQuery: Send + Sync {
    /// List courses visible to the actor: every course for a superuser,
    /// otherwise exactly the courses the actor is enrolled in.
    async fn list(&self, actor: Actor) -> Result<Vec<CourseView>, Error>;

    /// Retrieve one course by identifier.
    ///
    /// Resolution is authorization-agnostic: existence is the only check
    /// beyond the authentication the endpoint already required.
    async fn retrieve(&self, actor: Actor, course_id: Uuid) -> Result<CourseView, Error>;
}

/// Empty-catalogue stand-in for handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCoursesQuery;

#[async_trait]
impl CoursesQuery for FixtureCoursesQuery {
    async fn list(&self, _actor: Actor) -> Result<Vec<CourseView>, Error> {
        Ok(Vec::new())
    }

    async fn retrieve(&self, _actor: Actor, _course_id: Uuid) -> Result<CourseView, Error> {
        Err(Error::not_found("course not found."))
    }
}
