//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed schema exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.
//!
//! Referential behavior the adapters rely on:
//!
//! - `courses.instructor_id` references `accounts(id)` with `ON DELETE
//!   RESTRICT`; an instructor must be unassigned before the account row can
//!   go away.
//! - `contents.course_id` and `enrollments.course_id` reference
//!   `courses(id)` with `ON DELETE CASCADE`.
//! - `enrollments.student_id` references `accounts(id)` with `ON DELETE
//!   CASCADE`.
//! - `enrollments` carries a unique `(student_id, course_id)` constraint so
//!   re-enrolling is a no-op under `ON CONFLICT DO NOTHING`.

diesel::table! {
    /// Registered accounts.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login handle (max 150 characters).
        #[max_length = 150]
        handle -> Varchar,
        /// Unique email address (max 100 characters).
        #[max_length = 100]
        email -> Varchar,
        /// Argon2id PHC string; never leaves the persistence layer.
        #[max_length = 128]
        credential_hash -> Varchar,
        /// Unrestricted-write flag.
        is_superuser -> Bool,
    }
}

diesel::table! {
    /// Courses offered on the platform.
    courses (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique course name (max 100 characters).
        #[max_length = 100]
        name -> Varchar,
        /// Lifecycle label: "not started", "in progress", or "finished".
        #[max_length = 11]
        status -> Varchar,
        /// First day of teaching.
        start_date -> Date,
        /// Last day of teaching.
        end_date -> Date,
        /// Optional instructor account reference.
        instructor_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Teaching materials owned by a course.
    contents (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name (max 150 characters).
        #[max_length = 150]
        name -> Varchar,
        /// Teaching text.
        body -> Text,
        /// Optional video link (max 200 characters).
        #[max_length = 200]
        video_url -> Nullable<Varchar>,
        /// Owning course.
        course_id -> Uuid,
    }
}

diesel::table! {
    /// Student-course join records.
    enrollments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Membership label: "pending" or "accepted".
        #[max_length = 20]
        status -> Varchar,
        /// Enrolled student account.
        student_id -> Uuid,
        /// Course the student belongs to.
        course_id -> Uuid,
    }
}

diesel::joinable!(contents -> courses (course_id));
diesel::joinable!(enrollments -> accounts (student_id));
diesel::joinable!(enrollments -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, contents, courses, enrollments);
