//! Post read use cases.
//!
//! Each use case wraps the [`PostRepository`] port and collapses its
//! failures into a [`ContentError`] so callers only branch on a small set of
//! codes.

use std::sync::Arc;

use tracing::{debug, warn};

use super::ports::{ContentPage, PostListParams, PostRepository, RepositoryError};
use super::{ContentError, ContentErrorCode, Post, Slug};

/// Look up a single post by its slug.
#[derive(Clone)]
pub struct GetPostBySlugUseCase {
    posts: Arc<dyn PostRepository>,
}

impl GetPostBySlugUseCase {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Resolve `raw_slug` to a post.
    ///
    /// A slug that fails validation is reported as not found: no post can
    /// carry it.
    pub async fn execute(&self, raw_slug: &str, draft: bool) -> Result<Post, ContentError> {
        let slug = Slug::create(raw_slug).map_err(|err| {
            debug!(slug = raw_slug, code = err.code().as_str(), "rejected post slug");
            ContentError::not_found(format!("no post with slug {raw_slug:?}"))
        })?;
        match self.posts.find_by_slug(&slug, draft).await {
            Ok(Some(post)) => Ok(post),
            Ok(None) => Err(ContentError::not_found(format!("no post with slug {slug}"))),
            Err(err) => {
                warn!(slug = %slug, draft, error = %err, "post lookup failed");
                Err(lookup_error(err))
            }
        }
    }
}

/// List posts page by page.
#[derive(Clone)]
pub struct GetAllPostsUseCase {
    posts: Arc<dyn PostRepository>,
}

impl GetAllPostsUseCase {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, params: &PostListParams) -> Result<ContentPage<Post>, ContentError> {
        self.posts.find_all(&params.normalised()).await.map_err(|err| {
            warn!(page = params.page, error = %err, "post listing failed");
            listing_error(err)
        })
    }
}

/// Collect the slugs of every published post.
#[derive(Clone)]
pub struct GetPublishedPostSlugsUseCase {
    posts: Arc<dyn PostRepository>,
}

impl GetPublishedPostSlugsUseCase {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self) -> Result<Vec<Slug>, ContentError> {
        self.posts.find_published_slugs().await.map_err(|err| {
            warn!(error = %err, "published slug listing failed");
            listing_error(err)
        })
    }
}

fn lookup_error(err: RepositoryError) -> ContentError {
    let code = match &err {
        RepositoryError::Unavailable { .. } => ContentErrorCode::NetworkError,
        RepositoryError::Timeout { .. } => ContentErrorCode::Timeout,
        RepositoryError::Forbidden { .. } => ContentErrorCode::CorsError,
        RepositoryError::Query { .. }
        | RepositoryError::Mapping { .. }
        | RepositoryError::Unsupported { .. } => ContentErrorCode::Unknown,
    };
    ContentError::new(code, err.to_string())
}

fn listing_error(err: RepositoryError) -> ContentError {
    let code = match &err {
        RepositoryError::Timeout { .. } => ContentErrorCode::Timeout,
        RepositoryError::Unavailable { .. } => ContentErrorCode::NetworkError,
        _ => ContentErrorCode::DbError,
    };
    ContentError::new(code, err.to_string())
}
