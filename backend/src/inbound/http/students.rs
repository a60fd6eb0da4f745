//! Course roster API handlers.
//!
//! ```text
//! GET /api/courses/{course_id}/students
//! PUT /api/courses/{course_id}/students {"students":[{"email":"bob@example.com"}]}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CourseRoster, StudentEmail};
use crate::domain::{CourseEnrollment, EnrollmentStatus, Error, FieldErrors};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedActor;
use crate::inbound::http::state::HttpState;

/// Public representation of an enrollment with its student attributes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    /// Enrollment record identifier.
    pub id: Uuid,
    /// Membership state.
    pub status: EnrollmentStatus,
    /// Enrolled student account identifier.
    pub student_id: Uuid,
    /// Student handle.
    pub student_handle: String,
    /// Student email.
    pub student_email: String,
}

impl From<CourseEnrollment> for EnrollmentResponse {
    fn from(value: CourseEnrollment) -> Self {
        Self {
            id: value.id,
            status: value.status,
            student_id: value.student_id,
            student_handle: value.student_handle,
            student_email: value.student_email,
        }
    }
}

/// Course identity plus its complete enrollment list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseRosterResponse {
    /// Course identifier.
    pub id: Uuid,
    /// Course name.
    pub name: String,
    /// Every enrollment of the course.
    pub enrollments: Vec<EnrollmentResponse>,
}

impl From<CourseRoster> for CourseRosterResponse {
    fn from(value: CourseRoster) -> Self {
        Self {
            id: value.course_id,
            name: value.course_name,
            enrollments: value
                .enrollments
                .into_iter()
                .map(EnrollmentResponse::from)
                .collect(),
        }
    }
}

/// One student entry of the bulk-add payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StudentEntryBody {
    /// Email to resolve to an account.
    pub email: Option<String>,
}

/// Bulk-add request body for `PUT /api/courses/{course_id}/students`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddStudentsBody {
    /// Students to enroll, resolved in input order.
    pub students: Option<Vec<StudentEntryBody>>,
}

fn parse_entries(body: AddStudentsBody) -> Result<Vec<StudentEmail>, Error> {
    let mut fields = FieldErrors::new();
    let Some(students) = body.students else {
        fields.push_required("students");
        return Err(fields.into_error());
    };

    let mut entries = Vec::with_capacity(students.len());
    for entry in students {
        match entry.email {
            Some(email) if !email.is_empty() => entries.push(StudentEmail { email }),
            _ => {
                fields.push("students", "Each entry requires an email.");
            }
        }
    }
    fields.into_result()?;
    Ok(entries)
}

/// Fetch a course's roster. Superuser only.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/students",
    params(("course_id" = Uuid, Path, description = "Course to inspect")),
    responses(
        (status = 200, description = "Course with enrollments", body = CourseRosterResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Actor is not a superuser"),
        (status = 404, description = "Course not found"),
    ),
    tags = ["students"],
    operation_id = "courseRoster"
)]
#[get("/courses/{course_id}/students")]
pub async fn roster(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<CourseRosterResponse>> {
    let course_id = path.into_inner();
    let roster = state.enrollment.roster(actor.0, course_id).await?;
    Ok(web::Json(CourseRosterResponse::from(roster)))
}

/// Add students to a course by email, all-or-nothing. Superuser only.
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/students",
    request_body = AddStudentsBody,
    params(("course_id" = Uuid, Path, description = "Course to enroll into")),
    responses(
        (status = 200, description = "Course with its updated enrollments", body = CourseRosterResponse),
        (status = 400, description = "Unknown email or validation failure"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Actor is not a superuser"),
        (status = 404, description = "Course not found"),
    ),
    tags = ["students"],
    operation_id = "addStudents"
)]
#[put("/courses/{course_id}/students")]
pub async fn add_students(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<Uuid>,
    payload: web::Json<AddStudentsBody>,
) -> ApiResult<web::Json<CourseRosterResponse>> {
    let course_id = path.into_inner();
    let entries = parse_entries(payload.into_inner())?;
    let updated_roster = state
        .enrollment
        .add_students(actor.0, course_id, entries)
        .await?;
    Ok(web::Json(CourseRosterResponse::from(updated_roster)))
}
