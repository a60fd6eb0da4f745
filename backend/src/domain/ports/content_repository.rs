//! Port for content persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Content;

/// Persistence errors raised by content repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentPersistenceError {
    /// Repository connection could not be established.
    #[error("content repository connection failed: {message}")]
    Connection {
        /// Adapter-provided diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("content repository query failed: {message}")]
    Query {
        /// Adapter-provided diagnostic.
        message: String,
    },
}

impl ContentPersistenceError {
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

/// Port for content storage and lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Persist a new content record.
    async fn insert(&self, content: &Content) -> Result<(), ContentPersistenceError>;

    /// Fetch a content record by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, ContentPersistenceError>;

    /// List the contents owned by a course.
    async fn list_for_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<Content>, ContentPersistenceError>;

    /// Persist changed content attributes.
    async fn update(&self, content: &Content) -> Result<(), ContentPersistenceError>;

    /// Delete a content record permanently.
    ///
    /// Returns `false` when no such content existed.
    async fn delete(&self, id: Uuid) -> Result<bool, ContentPersistenceError>;
}
