//! URL slug value object.
//!
//! Slugs are non-empty identifiers of at most [`SLUG_MAX_LENGTH`] characters
//! drawn from lowercase ASCII letters, digits, hyphens and underscores.
//! Construction never rewrites its input: `My-Post` is rejected rather than
//! lowercased.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ValidationError, ValidationErrorCode};

/// Maximum slug length in characters.
pub const SLUG_MAX_LENGTH: usize = 100;

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_regex() -> &'static Regex {
    SLUG_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[a-z0-9_-]+$")
            .unwrap_or_else(|error| panic!("slug regex failed to compile: {error}"))
    })
}

/// Return `true` when `value` has the slug character shape.
///
/// Length is not checked; the preview route applies this to raw query input.
pub(crate) fn has_slug_format(value: &str) -> bool {
    slug_regex().is_match(value)
}

/// Validated slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate `value` as a slug.
    ///
    /// # Examples
    /// ```
    /// use folio::domain::{Slug, ValidationErrorCode};
    ///
    /// assert_eq!(Slug::create("hello-world").unwrap().as_ref(), "hello-world");
    /// let err = Slug::create("My-Post").unwrap_err();
    /// assert_eq!(err.code(), ValidationErrorCode::SlugInvalidFormat);
    /// ```
    pub fn create(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorCode::SlugRequired));
        }
        let length = value.chars().count();
        if length > SLUG_MAX_LENGTH {
            return Err(ValidationError::new(ValidationErrorCode::SlugTooLong)
                .with_metadata("maxLength", SLUG_MAX_LENGTH)
                .with_metadata("actualLength", length));
        }
        if !has_slug_format(&value) {
            return Err(ValidationError::new(ValidationErrorCode::SlugInvalidFormat)
                .with_metadata("value", value));
        }
        Ok(Self(value))
    }

    /// Derive a slug from free text such as a post title.
    ///
    /// Letters are lowercased, runs of whitespace and hyphens collapse to one
    /// hyphen, other characters are dropped, and the result is truncated.
    ///
    /// # Examples
    /// ```
    /// use folio::domain::Slug;
    ///
    /// let slug = Slug::from_title("  Hello, Rust World!  ").unwrap();
    /// assert_eq!(slug.as_ref(), "hello-rust-world");
    /// ```
    pub fn from_title(title: &str) -> Result<Self, ValidationError> {
        let mut slug = String::with_capacity(title.len());
        for ch in title.trim().chars() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                slug.push(ch.to_ascii_lowercase());
            } else if (ch.is_whitespace() || ch == '-') && !slug.is_empty() && !slug.ends_with('-')
            {
                slug.push('-');
            }
        }
        let mut truncated: String = slug.chars().take(SLUG_MAX_LENGTH).collect();
        while truncated.ends_with('-') {
            truncated.pop();
        }
        Self::create(truncated)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::create(value)
    }
}
