//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! Bulk enrollment runs inside a single transaction and leans on the
//! `(student_id, course_id)` unique constraint with `ON CONFLICT DO
//! NOTHING`, so concurrent add-student calls cannot produce duplicate rows.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{EnrollmentPersistenceError, EnrollmentRepository};
use crate::domain::{CourseEnrollment, EnrollmentStatus};

use super::models::{EnrollmentWithStudentRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, enrollments};

/// Diesel-backed implementation of the `EnrollmentRepository` port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EnrollmentPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> EnrollmentPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EnrollmentPersistenceError::connection("database connection error")
        }
        _ => EnrollmentPersistenceError::query("database error"),
    }
}

fn row_to_enrollment(row: EnrollmentWithStudentRow) -> CourseEnrollment {
    let status = row.status.parse::<EnrollmentStatus>().unwrap_or_else(|_| {
        warn!(
            value = row.status,
            enrollment_id = %row.id,
            "unrecognised enrollment status, defaulting to pending"
        );
        EnrollmentStatus::Pending
    });
    CourseEnrollment {
        id: row.id,
        status,
        student_id: row.student_id,
        student_handle: row.student_handle,
        student_email: row.student_email,
    }
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn list_for_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<CourseEnrollment>, EnrollmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EnrollmentWithStudentRow> = enrollments::table
            .inner_join(accounts::table)
            .filter(enrollments::course_id.eq(course_id))
            .select((
                enrollments::id,
                enrollments::status,
                enrollments::student_id,
                accounts::handle,
                accounts::email,
            ))
            .order_by(accounts::handle)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_enrollment).collect())
    }

    async fn is_enrolled(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool, EnrollmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let membership = enrollments::table
            .filter(enrollments::student_id.eq(student_id))
            .filter(enrollments::course_id.eq(course_id))
            .select(enrollments::id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(membership.is_some())
    }

    async fn enroll_pending(
        &self,
        course_id: Uuid,
        student_ids: &[Uuid],
    ) -> Result<(), EnrollmentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NewEnrollmentRow> = student_ids
            .iter()
            .map(|student_id| NewEnrollmentRow {
                id: Uuid::new_v4(),
                status: EnrollmentStatus::Pending.as_str().to_owned(),
                student_id: *student_id,
                course_id,
            })
            .collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(enrollments::table)
                    .values(&rows)
                    .on_conflict((enrollments::student_id, enrollments::course_id))
                    .do_nothing()
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
