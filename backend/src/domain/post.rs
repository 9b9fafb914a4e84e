//! Blog post entity as read from the CMS.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{Media, Slug};

/// Numeric CMS identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(u64);

impl PostId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Editorial status (`_status` in the CMS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

/// Author reference embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAuthor {
    pub id: u64,
    pub name: Option<String>,
}

/// Blog post.
///
/// ## Invariants
/// - `slug` is a validated [`Slug`].
/// - `published_at` is only meaningful for published posts; drafts may carry
///   a scheduled date.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
    pub excerpt: Option<String>,
    /// Rich-text document as stored by the CMS editor.
    pub content: Value,
    pub hero_image: Option<Media>,
    pub tags: Vec<String>,
    pub authors: Vec<PostAuthor>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    pub fn is_draft(&self) -> bool {
        self.status == PostStatus::Draft
    }

    /// Site-relative URL of the post page.
    pub fn path(&self) -> String {
        format!("/posts/{}", self.slug)
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Post {}
