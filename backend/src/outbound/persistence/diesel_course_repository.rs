//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.
//!
//! Deletion relies on the schema's `ON DELETE CASCADE` rules to remove the
//! course's contents and enrollments inside the same statement transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{CoursePersistenceError, CourseRepository};
use crate::domain::{Course, CourseName, CourseStatus};

use super::models::{CourseChangeset, CourseRow, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, enrollments};

const NAME_CONSTRAINT: &str = "courses_name_key";

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CoursePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CoursePersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CoursePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(NAME_CONSTRAINT) =>
        {
            CoursePersistenceError::DuplicateName
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CoursePersistenceError::connection("database connection error")
        }
        _ => CoursePersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain course.
fn row_to_course(row: CourseRow) -> Result<Course, CoursePersistenceError> {
    let name = CourseName::new(row.name).map_err(|err| {
        CoursePersistenceError::query(format!("stored course name invalid: {err}"))
    })?;
    let status = row.status.parse::<CourseStatus>().unwrap_or_else(|_| {
        warn!(
            value = row.status,
            course_id = %row.id,
            "unrecognised course status, defaulting to not started"
        );
        CourseStatus::NotStarted
    });
    Ok(Course::new(
        row.id,
        name,
        status,
        row.start_date,
        row.end_date,
        row.instructor_id,
    ))
}

fn rows_to_courses(rows: Vec<CourseRow>) -> Result<Vec<Course>, CoursePersistenceError> {
    rows.into_iter().map(row_to_course).collect()
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCourseRow {
            id: course.id(),
            name: course.name().as_ref(),
            status: course.status().as_str(),
            start_date: course.start_date(),
            end_date: course.end_date(),
            instructor_id: course.instructor(),
        };
        diesel::insert_into(courses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CourseRow> = courses::table
            .find(id)
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Course>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CourseRow> = courses::table
            .filter(courses::name.eq(name))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Course>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .select(CourseRow::as_select())
            .order_by(courses::name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_courses(rows)
    }

    async fn list_enrolled(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<Course>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Any enrollment status counts for visibility.
        let rows: Vec<CourseRow> = courses::table
            .inner_join(enrollments::table)
            .filter(enrollments::student_id.eq(student_id))
            .select(CourseRow::as_select())
            .order_by(courses::name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_courses(rows)
    }

    async fn update(&self, course: &Course) -> Result<(), CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = CourseChangeset {
            name: course.name().as_ref(),
            status: course.status().as_str(),
            start_date: course.start_date(),
            end_date: course.end_date(),
            instructor_id: course.instructor(),
        };
        diesel::update(courses::table.find(course.id()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Contents and enrollments go with the course via ON DELETE CASCADE.
        let deleted = diesel::delete(courses::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
