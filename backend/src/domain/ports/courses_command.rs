//! Driving port for course mutations.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::courses_query::CourseView;
use crate::domain::{Actor, CourseStatus, Error};

/// Raw course-creation payload as received from the wire.
///
/// Required fields are optional here so the service can aggregate every
/// missing-field message in one validation response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCourseRequest {
    /// Requested unique course name.
    pub name: Option<String>,
    /// Initial lifecycle state; defaults to "not started".
    pub status: Option<CourseStatus>,
    /// First day of teaching.
    pub start_date: Option<NaiveDate>,
    /// Last day of teaching.
    pub end_date: Option<NaiveDate>,
    /// Instructor account to assign.
    pub instructor: Option<Uuid>,
}

/// Partial course-update payload.
///
/// `instructor` distinguishes "absent" (`None`, leave unchanged) from an
/// explicit `null` (`Some(None)`, clear the assignment).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCourseRequest {
    /// Replacement course name.
    pub name: Option<String>,
    /// Replacement lifecycle state.
    pub status: Option<CourseStatus>,
    /// Replacement start date.
    pub start_date: Option<NaiveDate>,
    /// Replacement end date.
    pub end_date: Option<NaiveDate>,
    /// Replacement instructor assignment.
    pub instructor: Option<Option<Uuid>>,
}

/// Domain use-case port for creating, updating, and deleting courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesCommand: Send + Sync {
    /// Create a course after the collection-level policy gate.
    async fn create(&self, actor: Actor, request: CreateCourseRequest)
    -> Result<CourseView, Error>;

    /// Apply a partial update to a course. Superuser only.
    async fn update(
        &self,
        actor: Actor,
        course_id: Uuid,
        request: UpdateCourseRequest,
    ) -> Result<CourseView, Error>;

    /// Delete a course, cascading contents and enrollments. Superuser only.
    async fn delete(&self, actor: Actor, course_id: Uuid) -> Result<(), Error>;
}
