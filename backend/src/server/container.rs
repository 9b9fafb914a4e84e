//! Dependency injection root.
//!
//! The container is built once at startup; workers receive clones of its
//! `Arc`s through [`AppContainer::http_state`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use folio::domain::ports::{
    ContentSource, MediaRepository, PostRepository, PreviewAuthenticator, UserRepository,
};
use folio::domain::{
    GetAllPostsUseCase, GetPostBySlugUseCase, GetPublishedPostSlugsUseCase, PreviewPolicy,
};
use folio::inbound::http::state::HttpState;
use folio::outbound::payload::{
    PayloadHttpSource, PayloadMediaRepository, PayloadPostRepository, PayloadUserRepository,
};

use super::config::AppSettings;

/// Contract names of the services held by [`AppContainer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ServiceKey {
    PostRepository,
    UserRepository,
    MediaRepository,
    GetPostBySlugUseCase,
    GetAllPostsUseCase,
    GetPublishedPostSlugsUseCase,
}

impl ServiceKey {
    /// Every registered key, repositories first.
    pub const ALL: [Self; 6] = [
        Self::PostRepository,
        Self::UserRepository,
        Self::MediaRepository,
        Self::GetPostBySlugUseCase,
        Self::GetAllPostsUseCase,
        Self::GetPublishedPostSlugsUseCase,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostRepository => "postRepository",
            Self::UserRepository => "userRepository",
            Self::MediaRepository => "mediaRepository",
            Self::GetPostBySlugUseCase => "getPostBySlugUseCase",
            Self::GetAllPostsUseCase => "getAllPostsUseCase",
            Self::GetPublishedPostSlugsUseCase => "getPublishedPostSlugsUseCase",
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a service name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service key: {0}")]
pub struct UnknownServiceKey(pub String);

impl FromStr for ServiceKey {
    type Err = UnknownServiceKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| UnknownServiceKey(value.to_owned()))
    }
}

/// A service looked up by its [`ServiceKey`].
#[cfg_attr(
    not(test),
    expect(dead_code, reason = "payloads are read by name-based lookups in tests")
)]
#[derive(Clone)]
pub enum Service {
    PostRepository(Arc<dyn PostRepository>),
    UserRepository(Arc<dyn UserRepository>),
    MediaRepository(Arc<dyn MediaRepository>),
    GetPostBySlugUseCase(Arc<GetPostBySlugUseCase>),
    GetAllPostsUseCase(Arc<GetAllPostsUseCase>),
    GetPublishedPostSlugsUseCase(Arc<GetPublishedPostSlugsUseCase>),
}

impl Service {
    pub fn key(&self) -> ServiceKey {
        match self {
            Self::PostRepository(_) => ServiceKey::PostRepository,
            Self::UserRepository(_) => ServiceKey::UserRepository,
            Self::MediaRepository(_) => ServiceKey::MediaRepository,
            Self::GetPostBySlugUseCase(_) => ServiceKey::GetPostBySlugUseCase,
            Self::GetAllPostsUseCase(_) => ServiceKey::GetAllPostsUseCase,
            Self::GetPublishedPostSlugsUseCase(_) => ServiceKey::GetPublishedPostSlugsUseCase,
        }
    }
}

/// Repositories and use cases shared by every worker.
#[derive(Clone)]
pub struct AppContainer {
    pub post_repository: Arc<dyn PostRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub media_repository: Arc<dyn MediaRepository>,
    pub get_post_by_slug: Arc<GetPostBySlugUseCase>,
    pub get_all_posts: Arc<GetAllPostsUseCase>,
    pub get_published_post_slugs: Arc<GetPublishedPostSlugsUseCase>,
    pub preview_auth: Arc<dyn PreviewAuthenticator>,
    pub preview_policy: Arc<PreviewPolicy>,
}

impl AppContainer {
    /// Wire the Payload REST adapters described by `settings`.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, reqwest::Error> {
        let mut source =
            PayloadHttpSource::new(settings.payload_url.clone(), settings.payload_timeout)?;
        if let Some(api_key) = settings.payload_api_key.as_deref() {
            source = source.with_api_key(api_key);
        }
        let preview_auth = Arc::new(source.session_authenticator());
        Ok(Self::from_source(
            Arc::new(source),
            preview_auth,
            settings.preview_policy(),
        ))
    }

    /// Wire the repositories over an arbitrary content source.
    pub fn from_source(
        source: Arc<dyn ContentSource>,
        preview_auth: Arc<dyn PreviewAuthenticator>,
        preview_policy: PreviewPolicy,
    ) -> Self {
        let post_repository: Arc<dyn PostRepository> =
            Arc::new(PayloadPostRepository::new(Arc::clone(&source)));
        Self {
            user_repository: Arc::new(PayloadUserRepository::new(Arc::clone(&source))),
            media_repository: Arc::new(PayloadMediaRepository::new(source)),
            get_post_by_slug: Arc::new(GetPostBySlugUseCase::new(Arc::clone(&post_repository))),
            get_all_posts: Arc::new(GetAllPostsUseCase::new(Arc::clone(&post_repository))),
            get_published_post_slugs: Arc::new(GetPublishedPostSlugsUseCase::new(Arc::clone(
                &post_repository,
            ))),
            post_repository,
            preview_auth,
            preview_policy: Arc::new(preview_policy),
        }
    }

    /// Service registered under `key`.
    pub fn resolve(&self, key: ServiceKey) -> Service {
        match key {
            ServiceKey::PostRepository => Service::PostRepository(Arc::clone(&self.post_repository)),
            ServiceKey::UserRepository => Service::UserRepository(Arc::clone(&self.user_repository)),
            ServiceKey::MediaRepository => {
                Service::MediaRepository(Arc::clone(&self.media_repository))
            }
            ServiceKey::GetPostBySlugUseCase => {
                Service::GetPostBySlugUseCase(Arc::clone(&self.get_post_by_slug))
            }
            ServiceKey::GetAllPostsUseCase => {
                Service::GetAllPostsUseCase(Arc::clone(&self.get_all_posts))
            }
            ServiceKey::GetPublishedPostSlugsUseCase => {
                Service::GetPublishedPostSlugsUseCase(Arc::clone(&self.get_published_post_slugs))
            }
        }
    }

    /// Service registered under a contract name such as `postRepository`.
    ///
    /// # Errors
    /// Returns [`UnknownServiceKey`] when no service uses that name.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "contract-name lookup used by container tests")
    )]
    pub fn resolve_named(&self, name: &str) -> Result<Service, UnknownServiceKey> {
        name.parse().map(|key| self.resolve(key))
    }

    /// Keys of every registered service, for startup logging.
    pub fn registered_keys(&self) -> Vec<&'static str> {
        ServiceKey::ALL
            .into_iter()
            .map(|key| self.resolve(key).key().as_str())
            .collect()
    }

    /// Handler state sharing this container's services.
    pub fn http_state(&self) -> HttpState {
        HttpState {
            post_by_slug: Arc::clone(&self.get_post_by_slug),
            all_posts: Arc::clone(&self.get_all_posts),
            published_slugs: Arc::clone(&self.get_published_post_slugs),
            preview_policy: Arc::clone(&self.preview_policy),
            preview_auth: Arc::clone(&self.preview_auth),
        }
    }
}
