//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod content_query;
mod content_source;
mod media_repository;
mod post_repository;
mod preview_authenticator;
mod repository_error;
mod user_repository;

pub use content_query::{Collection, ContentPage, ContentQuery, Where};
#[cfg(test)]
pub use content_source::MockContentSource;
pub use content_source::{ContentSource, ContentSourceError, FixtureContentSource};
#[cfg(test)]
pub use media_repository::MockMediaRepository;
pub use media_repository::MediaRepository;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{
    DEFAULT_POSTS_PAGE_SIZE, MAX_POSTS_PAGE_SIZE, PostListParams, PostRepository,
};
#[cfg(test)]
pub use preview_authenticator::MockPreviewAuthenticator;
pub use preview_authenticator::{
    FixturePreviewAuthenticator, PreviewAuthError, PreviewAuthenticator,
};
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{ListParams, MAX_LIST_PAGE_SIZE, UserRepository};
