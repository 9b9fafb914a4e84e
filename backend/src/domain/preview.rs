//! Preview route validation.
//!
//! The preview route turns an editor's "open preview" click into a
//! draft-mode session. [`PreviewPolicy::check`] runs every input check in a
//! fixed order and stops at the first failure; the session lookup and the
//! redirect belong to the HTTP adapter.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::ports::Collection;
use super::slug::has_slug_format;
use super::Slug;

/// Prefix every preview redirect must stay under.
pub const PREVIEW_PATH_PREFIX: &str = "/posts/";

/// Raw preview query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewRequest {
    pub secret: Option<String>,
    pub slug: Option<String>,
    pub collection: Option<String>,
    pub path: Option<String>,
}

/// Validated preview destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTarget {
    pub collection: Collection,
    pub slug: Slug,
    /// Same-origin path the browser is redirected to.
    pub path: String,
}

/// Reason a preview request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PreviewRejection {
    #[error("Invalid preview secret")]
    InvalidSecret,
    #[error("Missing slug or collection")]
    MissingParameters,
    #[error("Invalid slug format")]
    InvalidSlug,
    #[error("Unsupported collection")]
    UnsupportedCollection,
    #[error("Invalid redirect path")]
    InvalidPath,
    #[error("Unauthorized")]
    Unauthorized,
}

impl PreviewRejection {
    /// `true` for rejections about who is asking rather than what was asked.
    pub fn is_forbidden(self) -> bool {
        matches!(self, Self::InvalidSecret | Self::Unauthorized)
    }
}

/// Holds the preview secret digest and applies the input checks.
#[derive(Clone)]
pub struct PreviewPolicy {
    secret_digest: Option<Zeroizing<[u8; 32]>>,
}

impl fmt::Debug for PreviewPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewPolicy")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl PreviewPolicy {
    /// Policy accepting requests that present `secret`.
    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret_digest: Some(digest(secret)),
        }
    }

    /// Policy rejecting every request.
    pub fn disabled() -> Self {
        Self {
            secret_digest: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret_digest.is_some()
    }

    /// Run the secret, parameter, slug, collection and path checks in order.
    ///
    /// # Examples
    /// ```
    /// use folio::domain::{PreviewPolicy, PreviewRejection, PreviewRequest};
    ///
    /// let policy = PreviewPolicy::with_secret("s3cret");
    /// let request = PreviewRequest {
    ///     secret: Some("s3cret".into()),
    ///     slug: Some("hello".into()),
    ///     collection: Some("posts".into()),
    ///     path: Some("//evil.com".into()),
    /// };
    /// assert_eq!(policy.check(&request), Err(PreviewRejection::InvalidPath));
    /// ```
    pub fn check(&self, request: &PreviewRequest) -> Result<PreviewTarget, PreviewRejection> {
        if !self.accepts_secret(request.secret.as_deref()) {
            return Err(PreviewRejection::InvalidSecret);
        }
        let (Some(slug), Some(collection)) = (
            non_blank(request.slug.as_deref()),
            non_blank(request.collection.as_deref()),
        ) else {
            return Err(PreviewRejection::MissingParameters);
        };
        if !has_slug_format(slug) {
            return Err(PreviewRejection::InvalidSlug);
        }
        let slug = Slug::create(slug).map_err(|_| PreviewRejection::InvalidSlug)?;
        let collection = match collection {
            "posts" => Collection::Posts,
            _ => return Err(PreviewRejection::UnsupportedCollection),
        };
        let path = match request.path.as_deref() {
            None | Some("") => format!("{PREVIEW_PATH_PREFIX}{slug}"),
            Some(path) if is_safe_redirect_path(path) => path.to_owned(),
            Some(_) => return Err(PreviewRejection::InvalidPath),
        };
        Ok(PreviewTarget {
            collection,
            slug,
            path,
        })
    }

    fn accepts_secret(&self, presented: Option<&str>) -> bool {
        let (Some(expected), Some(presented)) = (self.secret_digest.as_ref(), presented) else {
            return false;
        };
        let presented = digest(presented);
        expected
            .iter()
            .zip(presented.iter())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

fn digest(value: &str) -> Zeroizing<[u8; 32]> {
    Zeroizing::new(Sha256::digest(value.as_bytes()).into())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Same-origin path under [`PREVIEW_PATH_PREFIX`] with no traversal.
pub fn is_safe_redirect_path(path: &str) -> bool {
    path.starts_with(PREVIEW_PATH_PREFIX)
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
        && !path.split(['/', '?', '#']).any(is_parent_segment)
}

/// `..` in any mix of literal and percent-encoded dots.
fn is_parent_segment(segment: &str) -> bool {
    segment.to_ascii_lowercase().replace("%2e", ".") == ".."
}
