//! Map raw Payload documents into domain entities.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::dto::{
    AuthorDto, MediaDocDto, MediaSizeDto, PostDocDto, RelationDto, SlugDocDto, TagDto, UserDocDto,
};
use crate::domain::ports::RepositoryError;
use crate::domain::{
    FocalPoint, Media, MediaId, MediaParts, MediaSize, MediaSizes, Post, PostAuthor, PostId,
    PostStatus, Slug, User, UserId, UserRole,
};

fn decode<T: DeserializeOwned>(doc: Value, kind: &str) -> Result<T, RepositoryError> {
    serde_json::from_value(doc)
        .map_err(|err| RepositoryError::mapping(format!("invalid {kind} document: {err}")))
}

fn tag_names(tags: Option<Vec<TagDto>>) -> Vec<String> {
    tags.unwrap_or_default()
        .into_iter()
        .map(|entry| entry.tag)
        .collect()
}

pub(super) fn media_from_doc(doc: Value) -> Result<Media, RepositoryError> {
    media_from_dto(decode(doc, "media")?)
}

fn media_from_dto(dto: MediaDocDto) -> Result<Media, RepositoryError> {
    let id = dto.id;
    let sizes = dto.sizes.unwrap_or_default();
    let focal_point = match (dto.focal_x, dto.focal_y) {
        (Some(x), Some(y)) => Some(FocalPoint::new(x, y)),
        _ => None,
    };
    Media::reconstruct(MediaParts {
        id: MediaId::new(id),
        url: dto.url.unwrap_or_default(),
        filename: dto.filename.unwrap_or_default(),
        mime_type: dto.mime_type.unwrap_or_default(),
        filesize: dto.filesize.unwrap_or_default(),
        width: dto.width,
        height: dto.height,
        alt: dto.alt,
        caption: dto.caption,
        credit: dto.credit,
        tags: tag_names(dto.tags),
        sizes: MediaSizes {
            thumbnail: sizes.thumbnail.and_then(complete_size),
            card: sizes.card.and_then(complete_size),
        },
        focal_point,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
    })
    .map_err(|err| RepositoryError::mapping(format!("media {id}: {err}")))
}

/// Keep a rendition only when every field is present.
fn complete_size(dto: MediaSizeDto) -> Option<MediaSize> {
    Some(MediaSize {
        url: dto.url?,
        width: dto.width?,
        height: dto.height?,
        mime_type: dto.mime_type?,
        filesize: dto.filesize?,
        filename: dto.filename?,
    })
}

pub(super) fn user_from_doc(doc: Value) -> Result<User, RepositoryError> {
    let dto: UserDocDto = decode(doc, "user")?;
    let id = dto.id;
    let role = match dto.role.as_deref() {
        None => UserRole::User,
        Some(raw) => raw
            .parse()
            .map_err(|err| RepositoryError::mapping(format!("user {id}: {err}")))?,
    };
    User::reconstruct(
        UserId::new(id),
        dto.email,
        dto.name,
        role,
        dto.created_at,
        dto.updated_at,
    )
    .map_err(|err| RepositoryError::mapping(format!("user {id}: {err}")))
}

pub(super) fn post_from_doc(doc: Value) -> Result<Post, RepositoryError> {
    let dto: PostDocDto = decode(doc, "post")?;
    let id = dto.id;
    let slug = Slug::create(dto.slug)
        .map_err(|err| RepositoryError::mapping(format!("post {id}: {err}")))?;
    let status = match dto.status.as_deref() {
        // Collections without drafts never report a status.
        None | Some("published") => PostStatus::Published,
        Some("draft") => PostStatus::Draft,
        Some(other) => {
            return Err(RepositoryError::mapping(format!(
                "post {id}: unknown status {other:?}"
            )));
        }
    };
    let hero_image = match dto.hero_image {
        Some(RelationDto::Populated(media)) => Some(media_from_dto(*media)?),
        Some(RelationDto::Id(_)) | None => None,
    };
    let authors = dto
        .authors
        .unwrap_or_default()
        .into_iter()
        .map(|author| match author {
            RelationDto::Id(id) => PostAuthor { id, name: None },
            RelationDto::Populated(author) => {
                let AuthorDto { id, name } = *author;
                PostAuthor { id, name }
            }
        })
        .collect();
    Ok(Post {
        id: PostId::new(id),
        title: dto.title,
        slug,
        excerpt: dto.excerpt,
        content: dto.content,
        hero_image,
        tags: tag_names(dto.tags),
        authors,
        status,
        published_at: dto.published_at,
        created_at: dto.created_at,
        updated_at: dto.updated_at,
    })
}

pub(super) fn slug_from_doc(doc: Value) -> Result<Slug, RepositoryError> {
    let dto: SlugDocDto = decode(doc, "post slug")?;
    Slug::create(dto.slug).map_err(|err| RepositoryError::mapping(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn media_doc() -> Value {
        json!({
            "id": 4,
            "url": "/media/cover.jpg",
            "filename": "cover.jpg",
            "mimeType": "image/jpeg",
            "filesize": 2048,
            "width": 1600,
            "height": 900,
            "alt": "Cover",
            "tags": [{"tag": "hero", "id": "a1"}],
            "sizes": {
                "thumbnail": {
                    "url": "/media/cover-300x169.jpg",
                    "width": 300,
                    "height": 169,
                    "mimeType": "image/jpeg",
                    "filesize": 512,
                    "filename": "cover-300x169.jpg"
                },
                "card": {
                    "url": null,
                    "width": null,
                    "height": null,
                    "mimeType": null,
                    "filesize": null,
                    "filename": null
                }
            },
            "focalX": 40.0,
            "focalY": 60.0,
            "createdAt": "2025-01-02T03:04:05.000Z",
            "updatedAt": "2025-01-02T03:04:05.000Z"
        })
    }

    fn post_doc() -> Value {
        json!({
            "id": 12,
            "title": "Hello world",
            "slug": "hello-world",
            "excerpt": "Intro",
            "content": {"root": {"children": []}},
            "heroImage": media_doc(),
            "tags": [{"tag": "rust"}, {"tag": "cms"}],
            "authors": [3, {"id": 5, "name": "Ada"}],
            "_status": "published",
            "publishedAt": "2025-01-03T00:00:00.000Z",
            "createdAt": "2025-01-02T00:00:00.000Z",
            "updatedAt": "2025-01-03T00:00:00.000Z"
        })
    }

    #[rstest]
    fn maps_media_and_drops_partial_sizes() {
        let media = media_from_doc(media_doc()).expect("media maps");
        assert_eq!(media.id(), MediaId::new(4));
        assert!(media.sizes().thumbnail.is_some());
        assert!(media.sizes().card.is_none());
        assert!(media.has_tag("hero"));
        assert_eq!(media.focal_point().map(|p| p.x()), Some(40.0));
    }

    #[rstest]
    fn media_without_filename_is_a_mapping_error() {
        let mut doc = media_doc();
        doc["filename"] = Value::Null;
        let err = media_from_doc(doc).expect_err("filename required");
        assert!(matches!(err, RepositoryError::Mapping { .. }));
    }

    #[rstest]
    fn maps_post_with_populated_relations() {
        let post = post_from_doc(post_doc()).expect("post maps");
        assert_eq!(post.slug.as_ref(), "hello-world");
        assert_eq!(post.tags, ["rust", "cms"]);
        assert_eq!(
            post.authors,
            vec![
                PostAuthor { id: 3, name: None },
                PostAuthor {
                    id: 5,
                    name: Some("Ada".into())
                },
            ]
        );
        assert!(post.hero_image.is_some());
        assert!(post.is_published());
    }

    #[rstest]
    #[case(json!("draft"), PostStatus::Draft)]
    #[case(Value::Null, PostStatus::Published)]
    fn maps_post_status(#[case] status: Value, #[case] expected: PostStatus) {
        let mut doc = post_doc();
        doc["_status"] = status;
        doc["heroImage"] = json!(4);
        let post = post_from_doc(doc).expect("post maps");
        assert_eq!(post.status, expected);
        assert!(post.hero_image.is_none());
    }

    #[rstest]
    fn post_with_invalid_slug_is_a_mapping_error() {
        let mut doc = post_doc();
        doc["slug"] = json!("Hello World");
        let err = post_from_doc(doc).expect_err("slug rejected");
        assert!(matches!(err, RepositoryError::Mapping { .. }));
    }

    #[rstest]
    fn maps_user_role() {
        let user = user_from_doc(json!({
            "id": 1,
            "email": "editor@example.com",
            "name": "Ed",
            "role": "editor",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }))
        .expect("user maps");
        assert!(user.is_editor());
        assert_eq!(user.display_name(), "Ed");
    }

    #[rstest]
    fn unknown_user_role_is_a_mapping_error() {
        let err = user_from_doc(json!({
            "id": 1,
            "email": "x@example.com",
            "role": "owner",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }))
        .expect_err("role rejected");
        assert!(matches!(err, RepositoryError::Mapping { .. }));
    }
}
