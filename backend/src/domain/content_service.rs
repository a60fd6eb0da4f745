//! Content domain services.
//!
//! Implements the [`ContentsCommand`] and [`ContentsQuery`] driving ports.
//! Resolution order is part of the contract: the course resolves first so a
//! missing course and a missing content report distinct 404 details, and the
//! object-level policy only runs against a fully resolved target.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::content::{
    Content, ContentValidationError, validate_content_body, validate_content_name,
    validate_video_url,
};
use crate::domain::course_service::{
    COURSE_NOT_FOUND_MESSAGE, FORBIDDEN_MESSAGE, map_content_persistence_error,
    map_course_persistence_error, map_enrollment_persistence_error,
};
use crate::domain::policy::{self, ActionKind};
use crate::domain::ports::{
    ContentRepository, ContentsCommand, ContentsQuery, CourseRepository, CreateContentRequest,
    EnrollmentRepository, UpdateContentRequest,
};
use crate::domain::validation::FieldErrors;
use crate::domain::{Actor, Error};

/// Not-found detail for content lookups.
pub const CONTENT_NOT_FOUND_MESSAGE: &str = "content not found.";

/// Content service implementing the content driving ports.
#[derive(Clone)]
pub struct ContentService<C, K, E> {
    courses: Arc<C>,
    contents: Arc<K>,
    enrollments: Arc<E>,
}

impl<C, K, E> ContentService<C, K, E> {
    /// Create a new service with the given repositories.
    pub fn new(courses: Arc<C>, contents: Arc<K>, enrollments: Arc<E>) -> Self {
        Self {
            courses,
            contents,
            enrollments,
        }
    }
}

fn field_message(error: &ContentValidationError) -> String {
    match error {
        ContentValidationError::EmptyName | ContentValidationError::EmptyBody => {
            "This field is required.".to_owned()
        }
        ContentValidationError::NameTooLong { max }
        | ContentValidationError::VideoUrlTooLong { max } => {
            format!("Ensure this field has no more than {max} characters.")
        }
    }
}

impl<C, K, E> ContentService<C, K, E>
where
    C: CourseRepository,
    K: ContentRepository,
    E: EnrollmentRepository,
{
    /// Resolve the course, then the content, preserving the distinct 404
    /// details the API promises.
    async fn resolve(&self, course_id: Uuid, content_id: Uuid) -> Result<Content, Error> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_course_persistence_error)?;
        if course.is_none() {
            return Err(Error::not_found(COURSE_NOT_FOUND_MESSAGE));
        }

        let content = self
            .contents
            .find_by_id(content_id)
            .await
            .map_err(map_content_persistence_error)?
            .filter(|content| content.course_id() == course_id);
        content.ok_or_else(|| Error::not_found(CONTENT_NOT_FOUND_MESSAGE))
    }

    async fn check_object_access(
        &self,
        actor: Actor,
        action: ActionKind,
        course_id: Uuid,
    ) -> Result<(), Error> {
        let enrolled = if actor.is_superuser {
            // Superusers never need the membership fact.
            false
        } else {
            self.enrollments
                .is_enrolled(actor.id, course_id)
                .await
                .map_err(map_enrollment_persistence_error)?
        };
        if policy::content_object_access(actor, action, enrolled).is_allowed() {
            Ok(())
        } else {
            Err(Error::forbidden(FORBIDDEN_MESSAGE))
        }
    }
}

#[async_trait]
impl<C, K, E> ContentsQuery for ContentService<C, K, E>
where
    C: CourseRepository,
    K: ContentRepository,
    E: EnrollmentRepository,
{
    async fn retrieve(
        &self,
        actor: Actor,
        course_id: Uuid,
        content_id: Uuid,
    ) -> Result<Content, Error> {
        let content = self.resolve(course_id, content_id).await?;
        self.check_object_access(actor, ActionKind::Read, content.course_id())
            .await?;
        Ok(content)
    }
}

#[async_trait]
impl<C, K, E> ContentsCommand for ContentService<C, K, E>
where
    C: CourseRepository,
    K: ContentRepository,
    E: EnrollmentRepository,
{
    async fn create(
        &self,
        actor: Actor,
        course_id: Uuid,
        request: CreateContentRequest,
    ) -> Result<Content, Error> {
        if !policy::collection_access(actor, ActionKind::Write).is_allowed() {
            return Err(Error::forbidden(FORBIDDEN_MESSAGE));
        }

        let course = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_course_persistence_error)?;
        if course.is_none() {
            return Err(Error::not_found(COURSE_NOT_FOUND_MESSAGE));
        }

        let mut fields = FieldErrors::new();
        let name = match request.name.as_deref() {
            None | Some("") => {
                fields.push_required("name");
                None
            }
            Some(raw) => match validate_content_name(raw) {
                Ok(()) => Some(raw.to_owned()),
                Err(err) => {
                    fields.push("name", field_message(&err));
                    None
                }
            },
        };
        let body = match request.body.as_deref() {
            None | Some("") => {
                fields.push_required("content");
                None
            }
            Some(raw) => match validate_content_body(raw) {
                Ok(()) => Some(raw.to_owned()),
                Err(err) => {
                    fields.push("content", field_message(&err));
                    None
                }
            },
        };
        if let Some(url) = request.video_url.as_deref() {
            if let Err(err) = validate_video_url(url) {
                fields.push("video_url", field_message(&err));
            }
        }
        fields.into_result()?;

        let (Some(name), Some(body)) = (name, body) else {
            return Err(Error::internal("validation pass lost a field"));
        };

        let content = Content::new(Uuid::new_v4(), name, body, request.video_url, course_id);
        self.contents
            .insert(&content)
            .await
            .map_err(map_content_persistence_error)?;
        Ok(content)
    }

    async fn update(
        &self,
        actor: Actor,
        course_id: Uuid,
        content_id: Uuid,
        request: UpdateContentRequest,
    ) -> Result<Content, Error> {
        let mut content = self.resolve(course_id, content_id).await?;
        self.check_object_access(actor, ActionKind::Write, content.course_id())
            .await?;

        let mut fields = FieldErrors::new();
        if let Some(raw) = request.name {
            match validate_content_name(&raw) {
                Ok(()) => content.set_name(raw),
                Err(err) => fields.push("name", field_message(&err)),
            }
        }
        if let Some(raw) = request.body {
            match validate_content_body(&raw) {
                Ok(()) => content.set_body(raw),
                Err(err) => fields.push("content", field_message(&err)),
            }
        }
        if let Some(video_url) = request.video_url {
            if let Some(url) = video_url.as_deref() {
                match validate_video_url(url) {
                    Ok(()) => content.set_video_url(video_url),
                    Err(err) => fields.push("video_url", field_message(&err)),
                }
            } else {
                content.set_video_url(None);
            }
        }
        fields.into_result()?;

        self.contents
            .update(&content)
            .await
            .map_err(map_content_persistence_error)?;
        Ok(content)
    }

    async fn delete(&self, actor: Actor, course_id: Uuid, content_id: Uuid) -> Result<(), Error> {
        let content = self.resolve(course_id, content_id).await?;
        self.check_object_access(actor, ActionKind::Write, content.course_id())
            .await?;

        let deleted = self
            .contents
            .delete(content.id())
            .await
            .map_err(map_content_persistence_error)?;
        if !deleted {
            return Err(Error::not_found(CONTENT_NOT_FOUND_MESSAGE));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
