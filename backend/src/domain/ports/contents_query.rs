//! Driving port for content reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, Content, Error};

/// Domain use-case port for retrieving a content record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentsQuery: Send + Sync {
    /// Retrieve one content record.
    ///
    /// The course is resolved first (404 `course not found.`), then the
    /// content (404 `content not found.`), then the object-level policy
    /// runs: superusers always read; other actors read only when enrolled
    /// in the owning course.
    async fn retrieve(
        &self,
        actor: Actor,
        course_id: Uuid,
        content_id: Uuid,
    ) -> Result<Content, Error>;
}

/// Empty-catalogue stand-in for handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContentsQuery;

#[async_trait]
impl ContentsQuery for FixtureContentsQuery {
    async fn retrieve(
        &self,
        _actor: Actor,
        _course_id: Uuid,
        _content_id: Uuid,
    ) -> Result<Content, Error> {
        Err(Error::not_found("course not found."))
    }
}
