//! Course data model.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum allowed length for a course name.
pub const COURSE_NAME_MAX: usize = 100;

/// Validation errors raised by course value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Name exceeded [`COURSE_NAME_MAX`] characters.
    NameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Status string did not match a known lifecycle state.
    UnknownStatus,
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "course name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "course name must be at most {max} characters")
            }
            Self::UnknownStatus => {
                write!(f, "status must be one of: not started, in progress, finished")
            }
        }
    }
}

impl std::error::Error for CourseValidationError {}

/// Unique course name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseName(String);

impl CourseName {
    /// Validate and construct a [`CourseName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, CourseValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, CourseValidationError> {
        if name.trim().is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        if name.chars().count() > COURSE_NAME_MAX {
            return Err(CourseValidationError::NameTooLong {
                max: COURSE_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for CourseName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CourseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CourseName> for String {
    fn from(value: CourseName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CourseName {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Lifecycle state of a course.
///
/// Serialized with the human-readable labels clients already rely on
/// (`"not started"`, `"in progress"`, `"finished"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CourseStatus {
    /// Teaching has not begun.
    #[default]
    #[serde(rename = "not started")]
    NotStarted,
    /// Teaching is under way.
    #[serde(rename = "in progress")]
    InProgress,
    /// Teaching has concluded.
    #[serde(rename = "finished")]
    Finished,
}

impl CourseStatus {
    /// Stable storage label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseStatus {
    type Err = CourseValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "not started" => Ok(Self::NotStarted),
            "in progress" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            _ => Err(CourseValidationError::UnknownStatus),
        }
    }
}

/// Course aggregate root.
///
/// ## Invariants
/// - `name` satisfies [`CourseName`] validation and is globally unique.
/// - `instructor`, when set, references an existing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: Uuid,
    name: CourseName,
    status: CourseStatus,
    start_date: NaiveDate,
    end_date: NaiveDate,
    instructor: Option<Uuid>,
}

impl Course {
    /// Build a course from validated components.
    pub fn new(
        id: Uuid,
        name: CourseName,
        status: CourseStatus,
        start_date: NaiveDate,
        end_date: NaiveDate,
        instructor: Option<Uuid>,
    ) -> Self {
        Self {
            id,
            name,
            status,
            start_date,
            end_date,
            instructor,
        }
    }

    /// Stable course identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique course name.
    pub fn name(&self) -> &CourseName {
        &self.name
    }

    /// Current lifecycle state.
    pub fn status(&self) -> CourseStatus {
        self.status
    }

    /// First day of teaching.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of teaching.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Instructor account, when assigned.
    pub fn instructor(&self) -> Option<Uuid> {
        self.instructor
    }

    /// Replace the course name.
    pub fn set_name(&mut self, name: CourseName) {
        self.name = name;
    }

    /// Replace the lifecycle state.
    pub fn set_status(&mut self, status: CourseStatus) {
        self.status = status;
    }

    /// Replace the teaching dates.
    pub fn set_dates(&mut self, start_date: NaiveDate, end_date: NaiveDate) {
        self.start_date = start_date;
        self.end_date = end_date;
    }

    /// Assign or clear the instructor reference.
    pub fn set_instructor(&mut self, instructor: Option<Uuid>) {
        self.instructor = instructor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Rust 101", true)]
    #[case("", false)]
    #[case("   ", false)]
    fn course_name_validation(#[case] input: &str, #[case] accepted: bool) {
        assert_eq!(CourseName::new(input).is_ok(), accepted);
    }

    #[rstest]
    fn course_name_rejects_overlong_input() {
        let long = "n".repeat(COURSE_NAME_MAX + 1);
        assert_eq!(
            CourseName::new(long),
            Err(CourseValidationError::NameTooLong {
                max: COURSE_NAME_MAX
            })
        );
    }

    #[rstest]
    #[case(CourseStatus::NotStarted, "not started")]
    #[case(CourseStatus::InProgress, "in progress")]
    #[case(CourseStatus::Finished, "finished")]
    fn status_round_trips_through_labels(#[case] status: CourseStatus, #[case] label: &str) {
        assert_eq!(status.as_str(), label);
        assert_eq!(label.parse::<CourseStatus>(), Ok(status));
    }

    #[rstest]
    fn status_rejects_unknown_labels() {
        assert_eq!(
            "paused".parse::<CourseStatus>(),
            Err(CourseValidationError::UnknownStatus)
        );
    }

    #[rstest]
    fn status_serializes_with_spaces() {
        let value = serde_json::to_value(CourseStatus::NotStarted).expect("serialize status");
        assert_eq!(value, serde_json::json!("not started"));
    }

    #[rstest]
    fn default_status_is_not_started() {
        assert_eq!(CourseStatus::default(), CourseStatus::NotStarted);
    }
}
