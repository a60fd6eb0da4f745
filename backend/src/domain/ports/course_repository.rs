//! Port for course persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Course;

/// Persistence errors raised by course repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoursePersistenceError {
    /// Repository connection could not be established.
    #[error("course repository connection failed: {message}")]
    Connection {
        /// Adapter-provided diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("course repository query failed: {message}")]
    Query {
        /// Adapter-provided diagnostic.
        message: String,
    },
    /// Insert or update collided with the unique name constraint.
    #[error("a course with that name already exists")]
    DuplicateName,
}

impl CoursePersistenceError {
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

/// Port for course storage, lookups, and cascading deletion.
///
/// Deleting a course removes its contents and enrollments in the same
/// transaction; adapters lean on the schema's `ON DELETE CASCADE` rules
/// rather than issuing child deletes themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a new course.
    async fn insert(&self, course: &Course) -> Result<(), CoursePersistenceError>;

    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, CoursePersistenceError>;

    /// Fetch a course by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Course>, CoursePersistenceError>;

    /// List every course.
    async fn list_all(&self) -> Result<Vec<Course>, CoursePersistenceError>;

    /// List the courses a student is enrolled in, regardless of enrollment
    /// status.
    async fn list_enrolled(&self, student_id: Uuid)
    -> Result<Vec<Course>, CoursePersistenceError>;

    /// Persist changed course attributes.
    async fn update(&self, course: &Course) -> Result<(), CoursePersistenceError>;

    /// Delete a course, cascading contents and enrollments.
    ///
    /// Returns `false` when no such course existed.
    async fn delete(&self, id: Uuid) -> Result<bool, CoursePersistenceError>;
}
