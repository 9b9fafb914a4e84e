//! Tag list validation shared by posts and media.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ValidationError, ValidationErrorCode};

/// Maximum tag length in characters.
pub const TAG_MAX_LENGTH: usize = 50;

/// One entry of a CMS tag array (`{ "tag": "rust" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub tag: String,
}

impl TagEntry {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// Validate a tag array.
///
/// Tags are compared case-insensitively after trimming, so `React` and
/// `react` collide. The first offending entry determines the error.
///
/// # Examples
/// ```
/// use folio::domain::{TagEntry, ValidationErrorCode, validate_tags};
///
/// let tags = [TagEntry::new("React"), TagEntry::new("react")];
/// let err = validate_tags(&tags).unwrap_err();
/// assert_eq!(err.code(), ValidationErrorCode::TagDuplicate);
/// assert_eq!(err.to_string(), "Duplicate tags are not allowed");
/// ```
pub fn validate_tags(tags: &[TagEntry]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(tags.len());
    for (index, entry) in tags.iter().enumerate() {
        let trimmed = entry.tag.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(ValidationErrorCode::TagEmpty)
                .with_metadata("index", index));
        }
        let length = trimmed.chars().count();
        if length > TAG_MAX_LENGTH {
            return Err(ValidationError::new(ValidationErrorCode::TagTooLong)
                .with_metadata("index", index)
                .with_metadata("maxLength", TAG_MAX_LENGTH)
                .with_metadata("actualLength", length));
        }
        if !seen.insert(trimmed.to_lowercase()) {
            return Err(ValidationError::new(ValidationErrorCode::TagDuplicate)
                .with_metadata("tag", trimmed));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn entries(tags: &[&str]) -> Vec<TagEntry> {
        tags.iter().copied().map(TagEntry::new).collect()
    }

    #[rstest]
    #[case(&[])]
    #[case(&["rust", "payload", "blog"])]
    fn accepts_distinct_tags(#[case] tags: &[&str]) {
        assert!(validate_tags(&entries(tags)).is_ok());
    }

    #[rstest]
    fn duplicate_detection_ignores_case_and_padding() {
        let err = validate_tags(&entries(&["React", " react "])).expect_err("duplicate");
        assert_eq!(err.code(), ValidationErrorCode::TagDuplicate);
        assert_eq!(err.metadata().get("tag"), Some(&json!("react")));
    }

    #[rstest]
    fn blank_tag_reports_index() {
        let err = validate_tags(&entries(&["ok", "  "])).expect_err("blank");
        assert_eq!(err.code(), ValidationErrorCode::TagEmpty);
        assert_eq!(err.metadata().get("index"), Some(&json!(1)));
    }

    #[rstest]
    fn overlong_tag_is_rejected() {
        let long = "t".repeat(TAG_MAX_LENGTH + 1);
        let err = validate_tags(&entries(&[long.as_str()])).expect_err("too long");
        assert_eq!(err.code(), ValidationErrorCode::TagTooLong);
    }
}
