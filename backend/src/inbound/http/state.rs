//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain use cases and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::PreviewAuthenticator;
use crate::domain::{
    GetAllPostsUseCase, GetPostBySlugUseCase, GetPublishedPostSlugsUseCase, PreviewPolicy,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub post_by_slug: Arc<GetPostBySlugUseCase>,
    pub all_posts: Arc<GetAllPostsUseCase>,
    pub published_slugs: Arc<GetPublishedPostSlugsUseCase>,
    pub preview_policy: Arc<PreviewPolicy>,
    pub preview_auth: Arc<dyn PreviewAuthenticator>,
}

impl HttpState {
    /// Build state sharing one post repository across the use cases.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use folio::domain::PreviewPolicy;
    /// use folio::domain::ports::{FixtureContentSource, FixturePreviewAuthenticator};
    /// use folio::inbound::http::state::HttpState;
    /// use folio::outbound::payload::PayloadPostRepository;
    ///
    /// let posts = Arc::new(PayloadPostRepository::new(Arc::new(FixtureContentSource::default())));
    /// let state = HttpState::from_post_repository(
    ///     posts,
    ///     PreviewPolicy::disabled(),
    ///     Arc::new(FixturePreviewAuthenticator::anonymous()),
    /// );
    /// assert!(!state.preview_policy.is_enabled());
    /// ```
    pub fn from_post_repository(
        posts: Arc<dyn crate::domain::ports::PostRepository>,
        preview_policy: PreviewPolicy,
        preview_auth: Arc<dyn PreviewAuthenticator>,
    ) -> Self {
        Self {
            post_by_slug: Arc::new(GetPostBySlugUseCase::new(Arc::clone(&posts))),
            all_posts: Arc::new(GetAllPostsUseCase::new(Arc::clone(&posts))),
            published_slugs: Arc::new(GetPublishedPostSlugsUseCase::new(posts)),
            preview_policy: Arc::new(preview_policy),
            preview_auth,
        }
    }
}
