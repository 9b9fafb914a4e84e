//! Port abstraction for media assets.
use async_trait::async_trait;

use crate::domain::{Media, MediaId};

use super::{ContentPage, ListParams, RepositoryError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Fetch a media record by identifier.
    async fn find_by_id(&self, id: MediaId) -> Result<Option<Media>, RepositoryError>;

    /// Fetch one page of media records.
    async fn find_all(&self, params: &ListParams) -> Result<ContentPage<Media>, RepositoryError>;

    /// Persist a media record.
    async fn save(&self, media: &Media) -> Result<Media, RepositoryError>;

    /// Remove a media record, returning whether it existed.
    async fn delete(&self, id: MediaId) -> Result<bool, RepositoryError>;
}
