//! Port abstraction for CMS users.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::{ContentPage, RepositoryError};

/// Upper bound on page size for media and user listings.
pub const MAX_LIST_PAGE_SIZE: u32 = 100;

/// Generic paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    /// One-based page number.
    pub page: u32,
    pub limit: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl ListParams {
    /// Copy with `page` at least 1 and `limit` within `1..=MAX_LIST_PAGE_SIZE`.
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_LIST_PAGE_SIZE),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Fetch one page of users.
    async fn find_all(&self, params: &ListParams) -> Result<ContentPage<User>, RepositoryError>;

    /// Persist a user.
    async fn save(&self, user: &User) -> Result<User, RepositoryError>;

    /// Remove a user, returning whether it existed.
    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError>;
}
