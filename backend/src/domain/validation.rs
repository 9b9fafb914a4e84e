//! Localisation-agnostic validation failures.
//!
//! Validators return [`ValidationError`] values carrying a stable
//! [`ValidationErrorCode`] plus structured metadata; adapters translate the
//! code into user-facing text.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Stable validation error identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorCode {
    SlugRequired,
    SlugInvalidFormat,
    SlugTooLong,
    TagEmpty,
    TagTooLong,
    TagDuplicate,
    EmailInvalid,
    MediaFilenameRequired,
    MediaUrlRequired,
    MediaMimeTypeRequired,
}

impl ValidationErrorCode {
    /// Wire representation of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SlugRequired => "SLUG_REQUIRED",
            Self::SlugInvalidFormat => "SLUG_INVALID_FORMAT",
            Self::SlugTooLong => "SLUG_TOO_LONG",
            Self::TagEmpty => "TAG_EMPTY",
            Self::TagTooLong => "TAG_TOO_LONG",
            Self::TagDuplicate => "TAG_DUPLICATE",
            Self::EmailInvalid => "EMAIL_INVALID",
            Self::MediaFilenameRequired => "MEDIA_FILENAME_REQUIRED",
            Self::MediaUrlRequired => "MEDIA_URL_REQUIRED",
            Self::MediaMimeTypeRequired => "MEDIA_MIME_TYPE_REQUIRED",
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            Self::SlugRequired => "Slug is required",
            Self::SlugInvalidFormat => {
                "Slug may only contain lowercase letters, numbers, hyphens and underscores"
            }
            Self::SlugTooLong => "Slug is too long",
            Self::TagEmpty => "Tags must not be empty",
            Self::TagTooLong => "Tag is too long",
            Self::TagDuplicate => "Duplicate tags are not allowed",
            Self::EmailInvalid => "Email address is invalid",
            Self::MediaFilenameRequired => "Media filename is required",
            Self::MediaUrlRequired => "Media URL is required",
            Self::MediaMimeTypeRequired => "Media MIME type is required",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure with a stable code and optional metadata.
///
/// # Examples
/// ```
/// use folio::domain::{ValidationError, ValidationErrorCode};
///
/// let err = ValidationError::new(ValidationErrorCode::SlugTooLong)
///     .with_metadata("maxLength", 100);
/// assert_eq!(err.code(), ValidationErrorCode::SlugTooLong);
/// assert_eq!(err.metadata()["maxLength"], 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{}", .code.default_message())]
pub struct ValidationError {
    code: ValidationErrorCode,
    metadata: Map<String, Value>,
}

impl ValidationError {
    /// Error with no metadata.
    pub fn new(code: ValidationErrorCode) -> Self {
        Self {
            code,
            metadata: Map::new(),
        }
    }

    /// Return a copy with `key` set to `value` in the metadata.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn code(&self) -> ValidationErrorCode {
        self.code
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}
