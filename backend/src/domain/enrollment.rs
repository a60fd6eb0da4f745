//! Enrollment join records between students and courses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Membership state of a student within a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Added by an instructor, awaiting the student's acceptance.
    #[default]
    Pending,
    /// Confirmed membership.
    Accepted,
}

impl EnrollmentStatus {
    /// Stable storage label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an enrollment status label is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEnrollmentStatus;

impl fmt::Display for UnknownEnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status must be one of: pending, accepted")
    }
}

impl std::error::Error for UnknownEnrollmentStatus {}

impl FromStr for EnrollmentStatus {
    type Err = UnknownEnrollmentStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            _ => Err(UnknownEnrollmentStatus),
        }
    }
}

/// Join record linking a student account to a course.
///
/// ## Invariants
/// - Both sides exist when the record is created.
/// - `(student_id, course_id)` pairs are unique; re-enrolling is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    id: Uuid,
    status: EnrollmentStatus,
    student_id: Uuid,
    course_id: Uuid,
}

impl Enrollment {
    /// Build an enrollment from validated components.
    pub fn new(id: Uuid, status: EnrollmentStatus, student_id: Uuid, course_id: Uuid) -> Self {
        Self {
            id,
            status,
            student_id,
            course_id,
        }
    }

    /// Stable enrollment identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Membership state.
    pub fn status(&self) -> EnrollmentStatus {
        self.status
    }

    /// Enrolled student account.
    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    /// Course the student belongs to.
    pub fn course_id(&self) -> Uuid {
        self.course_id
    }
}

/// Enrollment enriched with the student attributes course views expose.
///
/// The credential hash never appears here; repositories project only the
/// public account columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEnrollment {
    /// Enrollment record identifier.
    pub id: Uuid,
    /// Membership state.
    pub status: EnrollmentStatus,
    /// Enrolled student account identifier.
    pub student_id: Uuid,
    /// Student handle at projection time.
    pub student_handle: String,
    /// Student email at projection time.
    pub student_email: String,
}
