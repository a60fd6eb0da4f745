//! Domain primitives, policy, and services.
//!
//! Purpose: define the strongly typed entities, the pure authorization
//! policy, and the use-case services behind the hexagonal boundary. Keep
//! types immutable where practical and document invariants and
//! serialisation contracts in each type's Rustdoc.

pub mod account;
pub mod account_service;
pub mod content;
pub mod content_service;
pub mod course;
pub mod course_service;
pub mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod policy;
pub mod ports;
pub mod validation;

pub use self::account::{
    Account, AccountValidationError, EMAIL_MAX, EmailAddress, HANDLE_MAX, Handle,
    LoginCredentials, LoginValidationError,
};
pub use self::account_service::{AccountService, LOGIN_FAILED_MESSAGE};
pub use self::content::{
    CONTENT_NAME_MAX, Content, ContentValidationError, VIDEO_URL_MAX, validate_content_body,
    validate_content_name, validate_video_url,
};
pub use self::content_service::{CONTENT_NOT_FOUND_MESSAGE, ContentService};
pub use self::course::{
    COURSE_NAME_MAX, Course, CourseName, CourseStatus, CourseValidationError,
};
pub use self::course_service::{
    COURSE_NOT_FOUND_MESSAGE, CourseService, FORBIDDEN_MESSAGE,
};
pub use self::enrollment::{
    CourseEnrollment, Enrollment, EnrollmentStatus, UnknownEnrollmentStatus,
};
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::policy::{ActionKind, Actor, Verdict};
pub use self::validation::{FieldErrors, REQUIRED_MESSAGE};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn denied() -> ApiResult<()> {
///     Err(Error::forbidden("You do not have permission to perform this action."))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
