//! Course catalogue domain services.
//!
//! Implements the [`CoursesQuery`] and [`CoursesCommand`] driving ports.
//! Mutations pass the collection-level policy gate before any validation or
//! storage work; reads are filtered by enrollment for non-superusers.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::course::{Course, CourseName, CourseValidationError};
use crate::domain::policy::{self, ActionKind};
use crate::domain::ports::{
    ContentPersistenceError, ContentRepository, CoursePersistenceError, CourseRepository,
    CourseView, CoursesCommand, CoursesQuery, CreateCourseRequest, EnrollmentPersistenceError,
    EnrollmentRepository, UpdateCourseRequest,
};
use crate::domain::validation::FieldErrors;
use crate::domain::{Actor, Error};

/// Permission failure detail shared by every gated endpoint.
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
/// Not-found detail for course lookups.
pub const COURSE_NOT_FOUND_MESSAGE: &str = "course not found.";

const DUPLICATE_NAME_MESSAGE: &str = "course with this name already exists.";

/// Course service implementing the catalogue driving ports.
#[derive(Clone)]
pub struct CourseService<C, K, E> {
    courses: Arc<C>,
    contents: Arc<K>,
    enrollments: Arc<E>,
}

impl<C, K, E> CourseService<C, K, E> {
    /// Create a new service with the given repositories.
    pub fn new(courses: Arc<C>, contents: Arc<K>, enrollments: Arc<E>) -> Self {
        Self {
            courses,
            contents,
            enrollments,
        }
    }
}

pub(crate) fn map_course_persistence_error(error: CoursePersistenceError) -> Error {
    match error {
        CoursePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CoursePersistenceError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
        CoursePersistenceError::DuplicateName => {
            let mut fields = FieldErrors::new();
            fields.push("name", DUPLICATE_NAME_MESSAGE);
            fields.into_error()
        }
    }
}

pub(crate) fn map_content_persistence_error(error: ContentPersistenceError) -> Error {
    match error {
        ContentPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("content repository unavailable: {message}"))
        }
        ContentPersistenceError::Query { message } => {
            Error::internal(format!("content repository error: {message}"))
        }
    }
}

pub(crate) fn map_enrollment_persistence_error(error: EnrollmentPersistenceError) -> Error {
    match error {
        EnrollmentPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        EnrollmentPersistenceError::Query { message } => {
            Error::internal(format!("enrollment repository error: {message}"))
        }
    }
}

fn name_message(error: &CourseValidationError) -> String {
    match error {
        CourseValidationError::EmptyName => "This field is required.".to_owned(),
        CourseValidationError::NameTooLong { max } => {
            format!("Ensure this field has no more than {max} characters.")
        }
        CourseValidationError::UnknownStatus => error.to_string(),
    }
}

fn require_write(actor: Actor) -> Result<(), Error> {
    if policy::collection_access(actor, ActionKind::Write).is_allowed() {
        Ok(())
    } else {
        Err(Error::forbidden(FORBIDDEN_MESSAGE))
    }
}

impl<C, K, E> CourseService<C, K, E>
where
    C: CourseRepository,
    K: ContentRepository,
    E: EnrollmentRepository,
{
    async fn build_view(&self, course: Course) -> Result<CourseView, Error> {
        let contents = self
            .contents
            .list_for_course(course.id())
            .await
            .map_err(map_content_persistence_error)?;
        let enrollments = self
            .enrollments
            .list_for_course(course.id())
            .await
            .map_err(map_enrollment_persistence_error)?;
        Ok(CourseView {
            course,
            contents,
            enrollments,
        })
    }

    async fn find_course(&self, course_id: Uuid) -> Result<Course, Error> {
        self.courses
            .find_by_id(course_id)
            .await
            .map_err(map_course_persistence_error)?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND_MESSAGE))
    }

    /// Reject a name already taken by a different course.
    async fn check_name_available(
        &self,
        name: &CourseName,
        current_id: Option<Uuid>,
    ) -> Result<(), Error> {
        let existing = self
            .courses
            .find_by_name(name.as_ref())
            .await
            .map_err(map_course_persistence_error)?;
        if existing.is_some_and(|course| Some(course.id()) != current_id) {
            let mut fields = FieldErrors::new();
            fields.push("name", DUPLICATE_NAME_MESSAGE);
            return fields.into_result();
        }
        Ok(())
    }
}

#[async_trait]
impl<C, K, E> CoursesQuery for CourseService<C, K, E>
where
    C: CourseRepository,
    K: ContentRepository,
    E: EnrollmentRepository,
{
    async fn list(&self, actor: Actor) -> Result<Vec<CourseView>, Error> {
        let courses = if actor.is_superuser {
            self.courses.list_all().await
        } else {
            self.courses.list_enrolled(actor.id).await
        }
        .map_err(map_course_persistence_error)?;

        let mut views = Vec::with_capacity(courses.len());
        for course in courses {
            views.push(self.build_view(course).await?);
        }
        Ok(views)
    }

    async fn retrieve(&self, _actor: Actor, course_id: Uuid) -> Result<CourseView, Error> {
        let course = self.find_course(course_id).await?;
        self.build_view(course).await
    }
}

#[async_trait]
impl<C, K, E> CoursesCommand for CourseService<C, K, E>
where
    C: CourseRepository,
    K: ContentRepository,
    E: EnrollmentRepository,
{
    async fn create(
        &self,
        actor: Actor,
        request: CreateCourseRequest,
    ) -> Result<CourseView, Error> {
        require_write(actor)?;

        let mut fields = FieldErrors::new();
        let name = match request.name.as_deref() {
            None | Some("") => {
                fields.push_required("name");
                None
            }
            Some(raw) => match CourseName::new(raw) {
                Ok(name) => Some(name),
                Err(err) => {
                    fields.push("name", name_message(&err));
                    None
                }
            },
        };
        if request.start_date.is_none() {
            fields.push_required("start_date");
        }
        if request.end_date.is_none() {
            fields.push_required("end_date");
        }
        fields.into_result()?;

        let (Some(name), Some(start_date), Some(end_date)) =
            (name, request.start_date, request.end_date)
        else {
            return Err(Error::internal("validation pass lost a field"));
        };

        self.check_name_available(&name, None).await?;

        let course = Course::new(
            Uuid::new_v4(),
            name,
            request.status.unwrap_or_default(),
            start_date,
            end_date,
            request.instructor,
        );
        self.courses
            .insert(&course)
            .await
            .map_err(map_course_persistence_error)?;

        Ok(CourseView {
            course,
            contents: Vec::new(),
            enrollments: Vec::new(),
        })
    }

    async fn update(
        &self,
        actor: Actor,
        course_id: Uuid,
        request: UpdateCourseRequest,
    ) -> Result<CourseView, Error> {
        require_write(actor)?;

        let mut course = self.find_course(course_id).await?;

        if let Some(raw) = request.name {
            let name = CourseName::new(raw).map_err(|err| {
                let mut fields = FieldErrors::new();
                fields.push("name", name_message(&err));
                fields.into_error()
            })?;
            if name != *course.name() {
                self.check_name_available(&name, Some(course.id())).await?;
            }
            course.set_name(name);
        }
        if let Some(status) = request.status {
            course.set_status(status);
        }
        let start_date = request.start_date.unwrap_or_else(|| course.start_date());
        let end_date = request.end_date.unwrap_or_else(|| course.end_date());
        course.set_dates(start_date, end_date);
        if let Some(instructor) = request.instructor {
            course.set_instructor(instructor);
        }

        self.courses
            .update(&course)
            .await
            .map_err(map_course_persistence_error)?;

        self.build_view(course).await
    }

    async fn delete(&self, actor: Actor, course_id: Uuid) -> Result<(), Error> {
        require_write(actor)?;

        let deleted = self
            .courses
            .delete(course_id)
            .await
            .map_err(map_course_persistence_error)?;
        if !deleted {
            return Err(Error::not_found(COURSE_NOT_FOUND_MESSAGE));
        }
        Ok(())
    }
}
