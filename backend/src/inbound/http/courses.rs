//! Course API handlers.
//!
//! ```text
//! GET/POST /api/courses
//! GET/PATCH/DELETE /api/courses/{course_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CourseView, CreateCourseRequest, UpdateCourseRequest};
use crate::domain::CourseStatus;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedActor;
use crate::inbound::http::contents::ContentResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::students::EnrollmentResponse;

/// Public representation of a course with its embedded children.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseResponse {
    /// Stable course identifier.
    pub id: Uuid,
    /// Unique course name.
    pub name: String,
    /// Lifecycle state label.
    pub status: CourseStatus,
    /// First day of teaching.
    pub start_date: NaiveDate,
    /// Last day of teaching.
    pub end_date: NaiveDate,
    /// Instructor account, when assigned.
    pub instructor: Option<Uuid>,
    /// Contents owned by the course.
    pub contents: Vec<ContentResponse>,
    /// Enrollments with student attributes.
    pub enrollments: Vec<EnrollmentResponse>,
}

impl From<CourseView> for CourseResponse {
    fn from(value: CourseView) -> Self {
        Self {
            id: value.course.id(),
            name: value.course.name().to_string(),
            status: value.course.status(),
            start_date: value.course.start_date(),
            end_date: value.course.end_date(),
            instructor: value.course.instructor(),
            contents: value.contents.into_iter().map(ContentResponse::from).collect(),
            enrollments: value
                .enrollments
                .into_iter()
                .map(EnrollmentResponse::from)
                .collect(),
        }
    }
}

/// Course creation body for `POST /api/courses`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateCourseBody {
    /// Requested unique course name.
    pub name: Option<String>,
    /// Initial lifecycle state; defaults to "not started".
    pub status: Option<CourseStatus>,
    /// First day of teaching.
    pub start_date: Option<NaiveDate>,
    /// Last day of teaching.
    pub end_date: Option<NaiveDate>,
    /// Instructor account to assign.
    pub instructor: Option<Uuid>,
}

/// Partial course update body for `PATCH /api/courses/{course_id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateCourseBody {
    /// Replacement course name.
    pub name: Option<String>,
    /// Replacement lifecycle state.
    pub status: Option<CourseStatus>,
    /// Replacement start date.
    pub start_date: Option<NaiveDate>,
    /// Replacement end date.
    pub end_date: Option<NaiveDate>,
    /// Replacement instructor; explicit `null` clears the assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<Option<Uuid>>,
}

/// List the courses visible to the actor.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses", body = [CourseResponse]),
        (status = 401, description = "Missing or invalid token"),
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let views = state.courses_query.list(actor.0).await?;
    Ok(web::Json(views.into_iter().map(CourseResponse::from).collect()))
}

/// Create a course. Superuser only.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseBody,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Per-field validation errors"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Actor is not a superuser"),
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    payload: web::Json<CreateCourseBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let view = state
        .courses_command
        .create(
            actor.0,
            CreateCourseRequest {
                name: body.name,
                status: body.status,
                start_date: body.start_date,
                end_date: body.end_date,
                instructor: body.instructor,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(view)))
}

/// Retrieve a course by id.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course to retrieve")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Course not found"),
    ),
    tags = ["courses"],
    operation_id = "retrieveCourse"
)]
#[get("/courses/{course_id}")]
pub async fn retrieve_course(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<CourseResponse>> {
    let view = state
        .courses_query
        .retrieve(actor.0, path.into_inner())
        .await?;
    Ok(web::Json(CourseResponse::from(view)))
}

/// Apply a partial update to a course. Superuser only.
#[utoipa::path(
    patch,
    path = "/api/courses/{course_id}",
    request_body = UpdateCourseBody,
    params(("course_id" = Uuid, Path, description = "Course to update")),
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Per-field validation errors"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Actor is not a superuser"),
        (status = 404, description = "Course not found"),
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[patch("/courses/{course_id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateCourseBody>,
) -> ApiResult<web::Json<CourseResponse>> {
    let body = payload.into_inner();
    let view = state
        .courses_command
        .update(
            actor.0,
            path.into_inner(),
            UpdateCourseRequest {
                name: body.name,
                status: body.status,
                start_date: body.start_date,
                end_date: body.end_date,
                instructor: body.instructor,
            },
        )
        .await?;
    Ok(web::Json(CourseResponse::from(view)))
}

/// Delete a course, cascading contents and enrollments. Superuser only.
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course to delete")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Actor is not a superuser"),
        (status = 404, description = "Course not found"),
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{course_id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .courses_command
        .delete(actor.0, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCoursesCommand, MockCoursesQuery};
    use crate::domain::{
        Actor, Course, CourseName, Error, FORBIDDEN_MESSAGE,
    };
    use crate::inbound::http::test_utils::{bearer, test_state};
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).expect("valid date")
    }

    fn sample_view(name: &str) -> CourseView {
        CourseView {
            course: Course::new(
                Uuid::new_v4(),
                CourseName::new(name).expect("course name"),
                CourseStatus::NotStarted,
                date(1),
                date(28),
                None,
            ),
            contents: Vec::new(),
            enrollments: Vec::new(),
        }
    }

    async fn send(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_courses)
                .service(create_course)
                .service(retrieve_course)
                .service(update_course)
                .service(delete_course),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let bytes = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[actix_web::test]
    async fn list_requires_authentication() {
        let request = actix_test::TestRequest::get().uri("/courses");
        let (status, _body) = send(test_state(), request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn list_serializes_course_fields_and_embedded_children() {
        let mut query = MockCoursesQuery::new();
        query
            .expect_list()
            .times(1)
            .return_once(|_| Ok(vec![sample_view("Rust")]));
        let mut state = test_state();
        state.courses_query = Arc::new(query);

        let request = actix_test::TestRequest::get()
            .uri("/courses")
            .insert_header((header::AUTHORIZATION, bearer(Actor::new(Uuid::new_v4(), true))));
        let (status, body) = send(state, request).await;

        assert_eq!(status, StatusCode::OK);
        let first = body.as_array().and_then(|a| a.first()).expect("one course");
        assert_eq!(first.get("name"), Some(&json!("Rust")));
        assert_eq!(first.get("status"), Some(&json!("not started")));
        assert_eq!(first.get("start_date"), Some(&json!("2026-08-01")));
        assert_eq!(first.get("contents"), Some(&json!([])));
        assert_eq!(first.get("enrollments"), Some(&json!([])));
    }

    #[actix_web::test]
    async fn create_passes_the_payload_through_and_returns_201() {
        let mut command = MockCoursesCommand::new();
        command
            .expect_create()
            .withf(|_, request| {
                request.name.as_deref() == Some("Rust")
                    && request.start_date == NaiveDate::from_ymd_opt(2026, 8, 1)
            })
            .times(1)
            .return_once(|_, _| Ok(sample_view("Rust")));
        let mut state = test_state();
        state.courses_command = Arc::new(command);

        let request = actix_test::TestRequest::post()
            .uri("/courses")
            .insert_header((header::AUTHORIZATION, bearer(Actor::new(Uuid::new_v4(), true))))
            .set_json(json!({
                "name": "Rust",
                "start_date": "2026-08-01",
                "end_date": "2026-08-28",
            }));
        let (status, body) = send(state, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.get("name"), Some(&json!("Rust")));
    }

    #[actix_web::test]
    async fn create_maps_forbidden_to_403_detail() {
        let mut command = MockCoursesCommand::new();
        command
            .expect_create()
            .times(1)
            .return_once(|_, _| Err(Error::forbidden(FORBIDDEN_MESSAGE)));
        let mut state = test_state();
        state.courses_command = Arc::new(command);

        let request = actix_test::TestRequest::post()
            .uri("/courses")
            .insert_header((header::AUTHORIZATION, bearer(Actor::new(Uuid::new_v4(), false))))
            .set_json(json!({ "name": "Rust" }));
        let (status, body) = send(state, request).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "detail": FORBIDDEN_MESSAGE }));
    }

    #[actix_web::test]
    async fn patch_forwards_explicit_null_instructor_as_a_clear() {
        let mut command = MockCoursesCommand::new();
        command
            .expect_update()
            .withf(|_, _, request| request.instructor == Some(None))
            .times(1)
            .return_once(|_, _, _| Ok(sample_view("Rust")));
        let mut state = test_state();
        state.courses_command = Arc::new(command);

        let request = actix_test::TestRequest::patch()
            .uri(&format!("/courses/{}", Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, bearer(Actor::new(Uuid::new_v4(), true))))
            .set_json(json!({ "instructor": null }));
        let (status, _body) = send(state, request).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn delete_returns_204() {
        let mut command = MockCoursesCommand::new();
        command.expect_delete().times(1).return_once(|_, _| Ok(()));
        let mut state = test_state();
        state.courses_command = Arc::new(command);

        let request = actix_test::TestRequest::delete()
            .uri(&format!("/courses/{}", Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, bearer(Actor::new(Uuid::new_v4(), true))));
        let (status, body) = send(state, request).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[actix_web::test]
    async fn retrieve_maps_missing_courses_to_404_detail() {
        let mut query = MockCoursesQuery::new();
        query
            .expect_retrieve()
            .times(1)
            .return_once(|_, _| Err(Error::not_found("course not found.")));
        let mut state = test_state();
        state.courses_query = Arc::new(query);

        let request = actix_test::TestRequest::get()
            .uri(&format!("/courses/{}", Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, bearer(Actor::new(Uuid::new_v4(), false))));
        let (status, body) = send(state, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "course not found." }));
    }
}
