//! Domain ports and supporting types for the hexagonal boundary.

mod account_repository;
mod content_repository;
mod contents_command;
mod contents_query;
mod course_repository;
mod courses_command;
mod courses_query;
mod credential_hasher;
mod enrollment_admin;
mod enrollment_repository;
mod login_service;
mod registration;
mod token_service;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountCredentials, AccountPersistenceError, AccountRepository};
#[cfg(test)]
pub use content_repository::MockContentRepository;
pub use content_repository::{ContentPersistenceError, ContentRepository};
#[cfg(test)]
pub use contents_command::MockContentsCommand;
pub use contents_command::{ContentsCommand, CreateContentRequest, UpdateContentRequest};
#[cfg(test)]
pub use contents_query::MockContentsQuery;
pub use contents_query::{ContentsQuery, FixtureContentsQuery};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CoursePersistenceError, CourseRepository};
#[cfg(test)]
pub use courses_command::MockCoursesCommand;
pub use courses_command::{CoursesCommand, CreateCourseRequest, UpdateCourseRequest};
#[cfg(test)]
pub use courses_query::MockCoursesQuery;
pub use courses_query::{CourseView, CoursesQuery, FixtureCoursesQuery};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher, FixtureCredentialHasher};
#[cfg(test)]
pub use enrollment_admin::MockEnrollmentAdmin;
pub use enrollment_admin::{CourseRoster, EnrollmentAdmin, StudentEmail};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{EnrollmentPersistenceError, EnrollmentRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use registration::MockRegistration;
pub use registration::{RegisteredAccount, Registration, RegistrationRequest};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{FixtureTokenService, TokenPair, TokenService, TokenServiceError};
