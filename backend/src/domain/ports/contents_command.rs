//! Driving port for content mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, Content, Error};

/// Raw content-creation payload as received from the wire.
///
/// The owning course id travels on the route, never in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateContentRequest {
    /// Display name.
    pub name: Option<String>,
    /// Teaching text.
    pub body: Option<String>,
    /// Optional video link.
    pub video_url: Option<String>,
}

/// Partial content-update payload.
///
/// `video_url` distinguishes "absent" (`None`, leave unchanged) from an
/// explicit `null` (`Some(None)`, clear the link).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateContentRequest {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement teaching text.
    pub body: Option<String>,
    /// Replacement video link.
    pub video_url: Option<Option<String>>,
}

/// Domain use-case port for creating, updating, and deleting contents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentsCommand: Send + Sync {
    /// Create a content under a course. Superuser only.
    async fn create(
        &self,
        actor: Actor,
        course_id: Uuid,
        request: CreateContentRequest,
    ) -> Result<Content, Error>;

    /// Apply a partial update to a content. Superuser only; the course is
    /// resolved before the content so 404 detail messages stay distinct.
    async fn update(
        &self,
        actor: Actor,
        course_id: Uuid,
        content_id: Uuid,
        request: UpdateContentRequest,
    ) -> Result<Content, Error>;

    /// Delete a content permanently. Superuser only.
    async fn delete(&self, actor: Actor, course_id: Uuid, content_id: Uuid) -> Result<(), Error>;
}
