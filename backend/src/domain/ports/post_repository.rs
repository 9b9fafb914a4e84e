//! Port abstraction for reading blog posts.

use async_trait::async_trait;

use crate::domain::{Post, Slug};

use super::{ContentPage, RepositoryError};

/// Default page size for post listings.
pub const DEFAULT_POSTS_PAGE_SIZE: u32 = 10;
/// Upper bound on page size accepted from callers.
pub const MAX_POSTS_PAGE_SIZE: u32 = 100;

/// Listing parameters for [`PostRepository::find_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListParams {
    /// One-based page number.
    pub page: u32,
    pub limit: u32,
    /// Only posts carrying this tag.
    pub tag: Option<String>,
    /// Include draft revisions (draft mode).
    pub include_drafts: bool,
}

impl Default for PostListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_POSTS_PAGE_SIZE,
            tag: None,
            include_drafts: false,
        }
    }
}

impl PostListParams {
    /// Copy with `page` at least 1 and `limit` within `1..=MAX_POSTS_PAGE_SIZE`.
    #[must_use]
    pub fn normalised(&self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_POSTS_PAGE_SIZE),
            tag: self
                .tag
                .as_deref()
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned),
            include_drafts: self.include_drafts,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch the post with `slug`; drafts are visible only when `draft` is set.
    async fn find_by_slug(&self, slug: &Slug, draft: bool) -> Result<Option<Post>, RepositoryError>;

    /// Fetch one page of posts, newest first.
    async fn find_all(&self, params: &PostListParams) -> Result<ContentPage<Post>, RepositoryError>;

    /// Slugs of every published post, across all pages.
    async fn find_published_slugs(&self) -> Result<Vec<Slug>, RepositoryError>;
}
