//! Payload-backed user repository. Read-only.

use std::sync::Arc;

use async_trait::async_trait;

use super::mappers::user_from_doc;
use crate::domain::ports::{
    Collection, ContentPage, ContentQuery, ContentSource, ListParams, RepositoryError,
    UserRepository, Where,
};
use crate::domain::{User, UserId};

#[derive(Clone)]
pub struct PayloadUserRepository {
    source: Arc<dyn ContentSource>,
}

impl PayloadUserRepository {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    async fn find_one(&self, clause: Where) -> Result<Option<User>, RepositoryError> {
        let query = ContentQuery::new(Collection::Users)
            .filter(Some(clause))
            .limit(1)
            .depth(0);
        let page = self.source.find(&query).await?;
        page.docs.into_iter().next().map(user_from_doc).transpose()
    }
}

#[async_trait]
impl UserRepository for PayloadUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.find_one(Where::equals("id", id.get())).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(None);
        }
        self.find_one(Where::equals("email", email.to_lowercase())).await
    }

    async fn find_all(&self, params: &ListParams) -> Result<ContentPage<User>, RepositoryError> {
        let params = params.normalised();
        let query = ContentQuery::new(Collection::Users)
            .limit(params.limit)
            .page(params.page)
            .sort("email")
            .depth(0);
        self.source.find(&query).await?.try_map(user_from_doc)
    }

    async fn save(&self, _user: &User) -> Result<User, RepositoryError> {
        Err(RepositoryError::unsupported("users.save"))
    }

    async fn delete(&self, _id: UserId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::unsupported("users.delete"))
    }
}
