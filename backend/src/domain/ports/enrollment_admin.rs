//! Driving port for enrollment management.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, CourseEnrollment, Error};

/// One entry of the bulk add-students payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentEmail {
    /// Email to resolve to an account by exact match.
    pub email: String,
}

/// Course identity plus its complete enrollment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRoster {
    /// Course identifier.
    pub course_id: Uuid,
    /// Course name.
    pub course_name: String,
    /// Every enrollment of the course, including ones from earlier calls.
    pub enrollments: Vec<CourseEnrollment>,
}

/// Domain use-case port for managing course rosters. Superuser only,
/// reads included.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentAdmin: Send + Sync {
    /// Add students to a course by email, all-or-nothing.
    ///
    /// Every email is resolved before any row is written; the first
    /// unresolved email aborts the whole call. Resolved students gain a
    /// pending enrollment; students already enrolled are left untouched.
    async fn add_students(
        &self,
        actor: Actor,
        course_id: Uuid,
        entries: Vec<StudentEmail>,
    ) -> Result<CourseRoster, Error>;

    /// Fetch a course's current roster.
    async fn roster(&self, actor: Actor, course_id: Uuid) -> Result<CourseRoster, Error>;
}
