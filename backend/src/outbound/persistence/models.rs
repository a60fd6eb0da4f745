//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, contents, courses, enrollments};

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub handle: String,
    pub email: String,
    pub credential_hash: String,
    pub is_superuser: bool,
}

/// Insertable struct for creating new account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub handle: &'a str,
    pub email: &'a str,
    pub credential_hash: &'a str,
    pub is_superuser: bool,
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub instructor_id: Option<Uuid>,
}

/// Insertable struct for creating new course records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub status: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub instructor_id: Option<Uuid>,
}

/// Changeset struct for updating existing course records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseChangeset<'a> {
    pub name: &'a str,
    pub status: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub instructor_id: Option<Uuid>,
}

/// Row struct for reading from the contents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentRow {
    pub id: Uuid,
    pub name: String,
    pub body: String,
    pub video_url: Option<String>,
    pub course_id: Uuid,
}

/// Insertable struct for creating new content records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contents)]
pub(crate) struct NewContentRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub body: &'a str,
    pub video_url: Option<&'a str>,
    pub course_id: Uuid,
}

/// Changeset struct for updating existing content records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contents)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContentChangeset<'a> {
    pub name: &'a str,
    pub body: &'a str,
    pub video_url: Option<&'a str>,
}

/// Insertable struct for creating new enrollment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow {
    pub id: Uuid,
    pub status: String,
    pub student_id: Uuid,
    pub course_id: Uuid,
}

/// Row struct for enrollment rows joined with public student columns.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct EnrollmentWithStudentRow {
    pub id: Uuid,
    pub status: String,
    pub student_id: Uuid,
    pub student_handle: String,
    pub student_email: String,
}
