//! Unit coverage for content resolution, policy, and mutation flows.

use super::*;
use crate::domain::course::{CourseName, CourseStatus};
use crate::domain::ports::{
    MockContentRepository, MockCourseRepository, MockEnrollmentRepository,
};
use crate::domain::{Course, ErrorCode};
use chrono::NaiveDate;
use rstest::rstest;

type Service =
    ContentService<MockCourseRepository, MockContentRepository, MockEnrollmentRepository>;

fn superuser() -> Actor {
    Actor::new(Uuid::new_v4(), true)
}

fn student() -> Actor {
    Actor::new(Uuid::new_v4(), false)
}

fn sample_course() -> Course {
    Course::new(
        Uuid::new_v4(),
        CourseName::new("Rust").expect("course name"),
        CourseStatus::NotStarted,
        NaiveDate::from_ymd_opt(2026, 8, 1).expect("date"),
        NaiveDate::from_ymd_opt(2026, 8, 28).expect("date"),
        None,
    )
}

fn sample_content(course_id: Uuid) -> Content {
    Content::new(
        Uuid::new_v4(),
        "Ownership".to_owned(),
        "Every value has a single owner.".to_owned(),
        None,
        course_id,
    )
}

fn courses_with(course: Course) -> MockCourseRepository {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(course)));
    courses
}

fn service(
    courses: MockCourseRepository,
    contents: MockContentRepository,
    enrollments: MockEnrollmentRepository,
) -> Service {
    ContentService::new(Arc::new(courses), Arc::new(contents), Arc::new(enrollments))
}

fn create_request(name: &str, body: &str) -> CreateContentRequest {
    CreateContentRequest {
        name: Some(name.to_owned()),
        body: Some(body.to_owned()),
        video_url: None,
    }
}

#[tokio::test]
async fn retrieve_reports_missing_course_before_missing_content() {
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().return_once(|_| Ok(None));
    let mut contents = MockContentRepository::new();
    contents.expect_find_by_id().times(0);

    let error = service(courses, contents, MockEnrollmentRepository::new())
        .retrieve(superuser(), Uuid::new_v4(), Uuid::new_v4())
        .await
        .expect_err("missing course fails");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), COURSE_NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn retrieve_reports_missing_content_under_existing_course() {
    let course = sample_course();
    let mut contents = MockContentRepository::new();
    contents.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(
        courses_with(course),
        contents,
        MockEnrollmentRepository::new(),
    )
    .retrieve(superuser(), Uuid::new_v4(), Uuid::new_v4())
    .await
    .expect_err("missing content fails");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), CONTENT_NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn retrieve_hides_content_owned_by_another_course() {
    let course = sample_course();
    let course_id = course.id();
    let foreign = sample_content(Uuid::new_v4());
    let mut contents = MockContentRepository::new();
    contents
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign)));

    let error = service(
        courses_with(course),
        contents,
        MockEnrollmentRepository::new(),
    )
    .retrieve(superuser(), course_id, Uuid::new_v4())
    .await
    .expect_err("foreign content fails");

    assert_eq!(error.message(), CONTENT_NOT_FOUND_MESSAGE);
}

#[rstest]
#[case(true, true)]
#[case(false, false)]
#[tokio::test]
async fn retrieve_grants_reads_to_enrolled_students_only(
    #[case] enrolled: bool,
    #[case] allowed: bool,
) {
    let course = sample_course();
    let course_id = course.id();
    let content = sample_content(course_id);
    let mut contents = MockContentRepository::new();
    contents
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(content)));
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_is_enrolled()
        .times(1)
        .return_once(move |_, _| Ok(enrolled));

    let result = service(courses_with(course), contents, enrollments)
        .retrieve(student(), course_id, Uuid::new_v4())
        .await;

    if allowed {
        let retrieved = result.expect("enrolled read succeeds");
        assert_eq!(retrieved.course_id(), course_id);
    } else {
        let error = result.expect_err("unenrolled read fails");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }
}

#[tokio::test]
async fn enrolled_students_never_gain_write_access() {
    let course = sample_course();
    let course_id = course.id();
    let content = sample_content(course_id);
    let mut contents = MockContentRepository::new();
    contents
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(content)));
    contents.expect_update().times(0);
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_is_enrolled()
        .return_once(|_, _| Ok(true));

    let error = service(courses_with(course), contents, enrollments)
        .update(
            student(),
            course_id,
            Uuid::new_v4(),
            UpdateContentRequest::default(),
        )
        .await
        .expect_err("enrolled write fails");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn create_denies_non_superusers_before_resolution() {
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().times(0);

    let error = service(
        courses,
        MockContentRepository::new(),
        MockEnrollmentRepository::new(),
    )
    .create(student(), Uuid::new_v4(), create_request("Ownership", "text"))
    .await
    .expect_err("student create fails");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn create_persists_content_under_the_route_course() {
    let course = sample_course();
    let course_id = course.id();
    let mut contents = MockContentRepository::new();
    contents
        .expect_insert()
        .withf(move |content| {
            content.course_id() == course_id
                && content.name() == "Ownership"
                && content.body() == "Every value has a single owner."
        })
        .times(1)
        .return_once(|_| Ok(()));

    let created = service(
        courses_with(course),
        contents,
        MockEnrollmentRepository::new(),
    )
    .create(
        superuser(),
        course_id,
        create_request("Ownership", "Every value has a single owner."),
    )
    .await
    .expect("create succeeds");

    assert_eq!(created.course_id(), course_id);
}

#[tokio::test]
async fn create_aggregates_missing_name_and_content() {
    let course = sample_course();
    let course_id = course.id();

    let error = service(
        courses_with(course),
        MockContentRepository::new(),
        MockEnrollmentRepository::new(),
    )
    .create(superuser(), course_id, CreateContentRequest::default())
    .await
    .expect_err("empty payload fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let fields = error
        .details()
        .and_then(|d| d.get("fields"))
        .expect("fields detail");
    assert!(fields.get("name").is_some());
    assert!(fields.get("content").is_some());
}

#[tokio::test]
async fn update_accepts_partial_body_only_payloads() {
    let course = sample_course();
    let course_id = course.id();
    let content = sample_content(course_id);
    let content_id = content.id();
    let mut contents = MockContentRepository::new();
    contents
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(content)));
    contents
        .expect_update()
        .withf(move |updated| {
            updated.id() == content_id
                && updated.body() == "Borrowing never outlives the owner."
                && updated.name() == "Ownership"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let request = UpdateContentRequest {
        body: Some("Borrowing never outlives the owner.".to_owned()),
        ..UpdateContentRequest::default()
    };
    let updated = service(
        courses_with(course),
        contents,
        MockEnrollmentRepository::new(),
    )
    .update(superuser(), course_id, content_id, request)
    .await
    .expect("update succeeds");

    assert_eq!(updated.body(), "Borrowing never outlives the owner.");
}

#[tokio::test]
async fn update_can_clear_the_video_url() {
    let course = sample_course();
    let course_id = course.id();
    let mut content = sample_content(course_id);
    content.set_video_url(Some("https://example.com/intro".to_owned()));
    let content_id = content.id();
    let mut contents = MockContentRepository::new();
    contents
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(content)));
    contents
        .expect_update()
        .withf(|updated| updated.video_url().is_none())
        .times(1)
        .return_once(|_| Ok(()));

    let request = UpdateContentRequest {
        video_url: Some(None),
        ..UpdateContentRequest::default()
    };
    let updated = service(
        courses_with(course),
        contents,
        MockEnrollmentRepository::new(),
    )
    .update(superuser(), course_id, content_id, request)
    .await
    .expect("update succeeds");

    assert!(updated.video_url().is_none());
}

#[tokio::test]
async fn delete_removes_the_row_for_superusers() {
    let course = sample_course();
    let course_id = course.id();
    let content = sample_content(course_id);
    let content_id = content.id();
    let mut contents = MockContentRepository::new();
    contents
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(content)));
    contents
        .expect_delete()
        .withf(move |id| *id == content_id)
        .times(1)
        .return_once(|_| Ok(true));

    service(
        courses_with(course),
        contents,
        MockEnrollmentRepository::new(),
    )
    .delete(superuser(), course_id, content_id)
    .await
    .expect("delete succeeds");
}
