//! Enrollment management domain service.
//!
//! Implements the [`EnrollmentAdmin`] driving port. Adding students is
//! all-or-nothing: every email resolves to an account before a single row
//! is written, so a failed lookup leaves the course roster untouched.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::course_service::{
    COURSE_NOT_FOUND_MESSAGE, FORBIDDEN_MESSAGE, map_course_persistence_error,
    map_enrollment_persistence_error,
};
use crate::domain::policy;
use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, CourseRepository, CourseRoster, EnrollmentAdmin,
    EnrollmentRepository, StudentEmail,
};
use crate::domain::{Actor, Course, Error};

/// Enrollment management service implementing the [`EnrollmentAdmin`] port.
#[derive(Clone)]
pub struct EnrollmentService<A, C, E> {
    accounts: Arc<A>,
    courses: Arc<C>,
    enrollments: Arc<E>,
}

impl<A, C, E> EnrollmentService<A, C, E> {
    /// Create a new service with the given repositories.
    pub fn new(accounts: Arc<A>, courses: Arc<C>, enrollments: Arc<E>) -> Self {
        Self {
            accounts,
            courses,
            enrollments,
        }
    }
}

fn map_account_persistence_error(error: AccountPersistenceError) -> Error {
    match error {
        AccountPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        other => Error::internal(format!("account repository error: {other}")),
    }
}

/// Detail message for an email with no matching account.
fn unknown_account_error(email: &str) -> Error {
    Error::invalid_request(format!("No active accounts was found: {email}."))
}

impl<A, C, E> EnrollmentService<A, C, E>
where
    A: AccountRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    fn require_manager(actor: Actor) -> Result<(), Error> {
        if policy::enrollment_management(actor).is_allowed() {
            Ok(())
        } else {
            Err(Error::forbidden(FORBIDDEN_MESSAGE))
        }
    }

    async fn find_course(&self, course_id: Uuid) -> Result<Course, Error> {
        self.courses
            .find_by_id(course_id)
            .await
            .map_err(map_course_persistence_error)?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND_MESSAGE))
    }

    async fn build_roster(&self, course: &Course) -> Result<CourseRoster, Error> {
        let enrollments = self
            .enrollments
            .list_for_course(course.id())
            .await
            .map_err(map_enrollment_persistence_error)?;
        Ok(CourseRoster {
            course_id: course.id(),
            course_name: course.name().to_string(),
            enrollments,
        })
    }

    /// Resolve every email to an account id, in input order, failing fast
    /// on the first miss.
    async fn resolve_students(&self, entries: &[StudentEmail]) -> Result<Vec<Uuid>, Error> {
        let mut student_ids = Vec::with_capacity(entries.len());
        for entry in entries {
            let account = self
                .accounts
                .find_by_email(&entry.email)
                .await
                .map_err(map_account_persistence_error)?
                .ok_or_else(|| unknown_account_error(&entry.email))?;
            student_ids.push(account.id());
        }
        Ok(student_ids)
    }
}

#[async_trait]
impl<A, C, E> EnrollmentAdmin for EnrollmentService<A, C, E>
where
    A: AccountRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    async fn add_students(
        &self,
        actor: Actor,
        course_id: Uuid,
        entries: Vec<StudentEmail>,
    ) -> Result<CourseRoster, Error> {
        Self::require_manager(actor)?;
        let course = self.find_course(course_id).await?;

        // Full resolution pass before any mutation preserves the
        // all-or-nothing contract without compensating deletes.
        let student_ids = self.resolve_students(&entries).await?;

        self.enrollments
            .enroll_pending(course.id(), &student_ids)
            .await
            .map_err(map_enrollment_persistence_error)?;

        self.build_roster(&course).await
    }

    async fn roster(&self, actor: Actor, course_id: Uuid) -> Result<CourseRoster, Error> {
        Self::require_manager(actor)?;
        let course = self.find_course(course_id).await?;
        self.build_roster(&course).await
    }
}
