//! Course content data model.

use std::fmt;

use uuid::Uuid;

/// Maximum allowed length for a content name.
pub const CONTENT_NAME_MAX: usize = 150;
/// Maximum allowed length for a content video URL.
pub const VIDEO_URL_MAX: usize = 200;

/// Validation errors raised by content value checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Name exceeded [`CONTENT_NAME_MAX`] characters.
    NameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Body text was missing or blank once trimmed.
    EmptyBody,
    /// Video URL exceeded [`VIDEO_URL_MAX`] characters.
    VideoUrlTooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

impl fmt::Display for ContentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "content name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "content name must be at most {max} characters")
            }
            Self::EmptyBody => write!(f, "content body must not be empty"),
            Self::VideoUrlTooLong { max } => {
                write!(f, "video url must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ContentValidationError {}

/// Validate a content name.
pub fn validate_content_name(name: &str) -> Result<(), ContentValidationError> {
    if name.trim().is_empty() {
        return Err(ContentValidationError::EmptyName);
    }
    if name.chars().count() > CONTENT_NAME_MAX {
        return Err(ContentValidationError::NameTooLong {
            max: CONTENT_NAME_MAX,
        });
    }
    Ok(())
}

/// Validate a content body.
pub fn validate_content_body(body: &str) -> Result<(), ContentValidationError> {
    if body.trim().is_empty() {
        return Err(ContentValidationError::EmptyBody);
    }
    Ok(())
}

/// Validate an optional video URL.
pub fn validate_video_url(url: &str) -> Result<(), ContentValidationError> {
    if url.chars().count() > VIDEO_URL_MAX {
        return Err(ContentValidationError::VideoUrlTooLong { max: VIDEO_URL_MAX });
    }
    Ok(())
}

/// Teaching material owned by exactly one course.
///
/// ## Invariants
/// - `name` and `body` satisfy the validation functions above.
/// - `course_id` references the owning course; contents never move between
///   courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    id: Uuid,
    name: String,
    body: String,
    video_url: Option<String>,
    course_id: Uuid,
}

impl Content {
    /// Build a content record from validated components.
    pub fn new(
        id: Uuid,
        name: String,
        body: String,
        video_url: Option<String>,
        course_id: Uuid,
    ) -> Self {
        Self {
            id,
            name,
            body,
            video_url,
            course_id,
        }
    }

    /// Stable content identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Teaching text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Optional video link.
    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    /// Owning course identifier.
    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    /// Replace the display name.
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Replace the teaching text.
    pub fn set_body(&mut self, body: String) {
        self.body = body;
    }

    /// Replace or clear the video link.
    pub fn set_video_url(&mut self, video_url: Option<String>) {
        self.video_url = video_url;
    }
}
