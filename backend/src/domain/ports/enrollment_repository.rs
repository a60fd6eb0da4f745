//! Port for enrollment persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::CourseEnrollment;

/// Persistence errors raised by enrollment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentPersistenceError {
    /// Repository connection could not be established.
    #[error("enrollment repository connection failed: {message}")]
    Connection {
        /// Adapter-provided diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("enrollment repository query failed: {message}")]
    Query {
        /// Adapter-provided diagnostic.
        message: String,
    },
}

impl EnrollmentPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for enrollment storage and membership lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// List a course's enrollments joined with student attributes, in a
    /// deterministic order.
    async fn list_for_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<CourseEnrollment>, EnrollmentPersistenceError>;

    /// Whether a student holds an enrollment (any status) in a course.
    async fn is_enrolled(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool, EnrollmentPersistenceError>;

    /// Enroll every listed student with pending status inside a single
    /// transaction.
    ///
    /// Students already enrolled are skipped; either all remaining rows
    /// commit or none do.
    async fn enroll_pending(
        &self,
        course_id: Uuid,
        student_ids: &[Uuid],
    ) -> Result<(), EnrollmentPersistenceError>;
}
