//! DTOs for decoding Payload REST responses.
//!
//! Documents are decoded into these transport shapes first and then mapped
//! into entities by the `mappers` module.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::ContentPage;

/// Paginated `find` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PageDto {
    #[serde(default)]
    pub(super) docs: Vec<Value>,
    #[serde(default)]
    pub(super) total_docs: u64,
    pub(super) total_pages: Option<u32>,
    pub(super) page: Option<u32>,
    pub(super) has_next_page: Option<bool>,
    pub(super) has_prev_page: Option<bool>,
}

impl From<PageDto> for ContentPage<Value> {
    fn from(value: PageDto) -> Self {
        Self {
            docs: value.docs,
            total_docs: value.total_docs,
            total_pages: value.total_pages,
            page: value.page,
            has_next_page: value.has_next_page,
            has_prev_page: value.has_prev_page,
        }
    }
}

/// `GET /api/users/me` response.
#[derive(Debug, Deserialize)]
pub(super) struct MeDto {
    #[serde(default)]
    pub(super) user: Option<Value>,
}

/// A relationship field: either the bare id or the populated document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RelationDto<T> {
    Id(u64),
    Populated(Box<T>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostDocDto {
    pub(super) id: u64,
    pub(super) title: String,
    pub(super) slug: String,
    pub(super) excerpt: Option<String>,
    #[serde(default)]
    pub(super) content: Value,
    pub(super) hero_image: Option<RelationDto<MediaDocDto>>,
    #[serde(default)]
    pub(super) tags: Option<Vec<TagDto>>,
    #[serde(default)]
    pub(super) authors: Option<Vec<RelationDto<AuthorDto>>>,
    #[serde(rename = "_status")]
    pub(super) status: Option<String>,
    pub(super) published_at: Option<DateTime<Utc>>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TagDto {
    pub(super) tag: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorDto {
    pub(super) id: u64,
    pub(super) name: Option<String>,
}

/// Slug-only projection returned by `select[slug]=true`.
#[derive(Debug, Deserialize)]
pub(super) struct SlugDocDto {
    pub(super) slug: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MediaDocDto {
    pub(super) id: u64,
    pub(super) url: Option<String>,
    pub(super) filename: Option<String>,
    pub(super) mime_type: Option<String>,
    pub(super) filesize: Option<u64>,
    pub(super) width: Option<u32>,
    pub(super) height: Option<u32>,
    pub(super) alt: Option<String>,
    pub(super) caption: Option<String>,
    pub(super) credit: Option<String>,
    #[serde(default)]
    pub(super) tags: Option<Vec<TagDto>>,
    #[serde(default)]
    pub(super) sizes: Option<MediaSizesDto>,
    pub(super) focal_x: Option<f64>,
    pub(super) focal_y: Option<f64>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MediaSizesDto {
    pub(super) thumbnail: Option<MediaSizeDto>,
    pub(super) card: Option<MediaSizeDto>,
}

/// Size rendition; Payload reports every field as nullable.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MediaSizeDto {
    pub(super) url: Option<String>,
    pub(super) width: Option<u32>,
    pub(super) height: Option<u32>,
    pub(super) mime_type: Option<String>,
    pub(super) filesize: Option<u64>,
    pub(super) filename: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDocDto {
    pub(super) id: u64,
    pub(super) email: String,
    pub(super) name: Option<String>,
    pub(super) role: Option<String>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}
