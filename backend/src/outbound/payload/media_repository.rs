//! Payload-backed media repository. Read-only.

use std::sync::Arc;

use async_trait::async_trait;

use super::mappers::media_from_doc;
use crate::domain::ports::{
    Collection, ContentPage, ContentQuery, ContentSource, ListParams, MediaRepository,
    RepositoryError, Where,
};
use crate::domain::{Media, MediaId};

#[derive(Clone)]
pub struct PayloadMediaRepository {
    source: Arc<dyn ContentSource>,
}

impl PayloadMediaRepository {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl MediaRepository for PayloadMediaRepository {
    async fn find_by_id(&self, id: MediaId) -> Result<Option<Media>, RepositoryError> {
        let query = ContentQuery::new(Collection::Media)
            .filter(Some(Where::equals("id", id.get())))
            .limit(1)
            .depth(0);
        let page = self.source.find(&query).await?;
        page.docs.into_iter().next().map(media_from_doc).transpose()
    }

    async fn find_all(&self, params: &ListParams) -> Result<ContentPage<Media>, RepositoryError> {
        let params = params.normalised();
        let query = ContentQuery::new(Collection::Media)
            .limit(params.limit)
            .page(params.page)
            .sort("-createdAt")
            .depth(0);
        self.source.find(&query).await?.try_map(media_from_doc)
    }

    async fn save(&self, _media: &Media) -> Result<Media, RepositoryError> {
        Err(RepositoryError::unsupported("media.save"))
    }

    async fn delete(&self, _id: MediaId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::unsupported("media.delete"))
    }
}
