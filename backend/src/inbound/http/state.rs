//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ContentsCommand, ContentsQuery, CoursesCommand, CoursesQuery, EnrollmentAdmin, LoginService,
    Registration, TokenService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account registration use-case.
    pub registration: Arc<dyn Registration>,
    /// Login use-case.
    pub login: Arc<dyn LoginService>,
    /// Course read use-cases.
    pub courses_query: Arc<dyn CoursesQuery>,
    /// Course mutation use-cases.
    pub courses_command: Arc<dyn CoursesCommand>,
    /// Content read use-case.
    pub contents_query: Arc<dyn ContentsQuery>,
    /// Content mutation use-cases.
    pub contents_command: Arc<dyn ContentsCommand>,
    /// Roster management use-cases.
    pub enrollment: Arc<dyn EnrollmentAdmin>,
    /// Bearer-token verification for the authentication extractor.
    pub tokens: Arc<dyn TokenService>,
}
