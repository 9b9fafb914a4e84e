//! Domain primitives, aggregates, use cases and ports.
//!
//! Purpose: define strongly typed content entities used by the HTTP and
//! Payload adapters. Types are immutable; mutators hand back new values.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - ContentError / ContentErrorCode: coarse use-case failure codes.
//! - ValidationError / ValidationErrorCode: domain validation failures.
//! - Slug, TagEntry: validated value objects.
//! - Media, User, Post: content entities.
//! - GetPostBySlugUseCase, GetAllPostsUseCase, GetPublishedPostSlugsUseCase.
//! - PreviewRequest / PreviewPolicy: preview route validation chain.

pub mod content_error;
pub mod error;
pub mod filters;
pub mod media;
pub mod outcome;
pub mod ports;
pub mod post;
pub mod posts_service;
pub mod preview;
pub mod slug;
pub mod tags;
mod timestamps;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::content_error::{ContentError, ContentErrorCode};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::media::{
    FocalPoint, Media, MediaDraft, MediaId, MediaParts, MediaSize, MediaSizes,
};
pub use self::outcome::{CaughtError, combine, is_failure, is_success, try_async, try_catch};
pub use self::post::{Post, PostAuthor, PostId, PostStatus};
pub use self::posts_service::{
    GetAllPostsUseCase, GetPostBySlugUseCase, GetPublishedPostSlugsUseCase,
};
pub use self::preview::{
    PREVIEW_PATH_PREFIX, PreviewPolicy, PreviewRejection, PreviewRequest, PreviewTarget,
    is_safe_redirect_path,
};
pub use self::slug::{SLUG_MAX_LENGTH, Slug};
pub use self::tags::{TAG_MAX_LENGTH, TagEntry, validate_tags};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserRole};
pub use self::validation::{ValidationError, ValidationErrorCode};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use folio::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
