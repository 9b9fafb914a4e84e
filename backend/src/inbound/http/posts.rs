//! Posts API handlers.
//!
//! ```text
//! GET /api/v1/posts?page=1&limit=10&tag=rust
//! GET /api/v1/posts/slugs
//! GET /api/v1/posts/{slug}
//! ```
//!
//! Draft revisions are served only to sessions in draft mode; those
//! responses are marked `no-store`.

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ContentPage, DEFAULT_POSTS_PAGE_SIZE, PostListParams};
use crate::domain::{Error, Media, MediaSize, Post, PostAuthor};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string accepted by `GET /api/v1/posts`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostsQuery {
    /// One-based page number.
    pub page: Option<u32>,
    /// Page size, at most 100.
    pub limit: Option<u32>,
    /// Only posts carrying this tag.
    pub tag: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaSizeDto {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
}

impl From<&MediaSize> for MediaSizeDto {
    fn from(value: &MediaSize) -> Self {
        Self {
            url: value.url.clone(),
            width: value.width,
            height: value.height,
            mime_type: value.mime_type.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaDto {
    pub id: u64,
    pub url: String,
    pub alt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mime_type: String,
    pub thumbnail: Option<MediaSizeDto>,
    pub card: Option<MediaSizeDto>,
}

impl From<&Media> for MediaDto {
    fn from(value: &Media) -> Self {
        Self {
            id: value.id().get(),
            url: value.url().to_owned(),
            alt: value.alt().map(str::to_owned),
            width: value.width(),
            height: value.height(),
            mime_type: value.mime_type().to_owned(),
            thumbnail: value.sizes().thumbnail.as_ref().map(MediaSizeDto::from),
            card: value.sizes().card.as_ref().map(MediaSizeDto::from),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: u64,
    pub name: Option<String>,
}

impl From<&PostAuthor> for AuthorDto {
    fn from(value: &PostAuthor) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
        }
    }
}

/// Post as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: u64,
    pub title: String,
    #[schema(example = "hello-world")]
    pub slug: String,
    pub excerpt: Option<String>,
    /// Rich-text document as stored by the CMS editor.
    #[schema(value_type = Object)]
    pub content: Value,
    pub hero_image: Option<MediaDto>,
    pub tags: Vec<String>,
    pub authors: Vec<AuthorDto>,
    #[schema(example = "published")]
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(value: Post) -> Self {
        Self {
            id: value.id.get(),
            hero_image: value.hero_image.as_ref().map(MediaDto::from),
            authors: value.authors.iter().map(AuthorDto::from).collect(),
            status: value.status.as_str().to_owned(),
            title: value.title,
            slug: value.slug.into(),
            excerpt: value.excerpt,
            content: value.content,
            tags: value.tags,
            published_at: value.published_at,
            updated_at: value.updated_at,
        }
    }
}

/// One page of posts.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostPageDto {
    pub docs: Vec<PostDto>,
    pub total_docs: u64,
    pub total_pages: Option<u32>,
    pub page: Option<u32>,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl From<ContentPage<Post>> for PostPageDto {
    fn from(value: ContentPage<Post>) -> Self {
        Self {
            has_next_page: value.has_more(),
            has_prev_page: value.has_prev_page.unwrap_or(false),
            total_docs: value.total_docs,
            total_pages: value.total_pages,
            page: value.page,
            docs: value.docs.into_iter().map(PostDto::from).collect(),
        }
    }
}

fn json_response<T: Serialize>(draft: bool, body: T) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    if draft {
        builder.insert_header((header::CACHE_CONTROL, "private, no-store"));
    }
    builder.json(body)
}

/// List posts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(PostsQuery),
    responses(
        (status = 200, description = "Page of posts", body = PostPageDto),
        (status = 500, description = "Internal server error", body = Error),
        (status = 502, description = "Content store unavailable", body = Error),
        (status = 504, description = "Content store timed out", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PostsQuery>,
) -> ApiResult<HttpResponse> {
    let draft = session.is_draft_mode();
    let query = query.into_inner();
    let params = PostListParams {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(DEFAULT_POSTS_PAGE_SIZE),
        tag: query.tag,
        include_drafts: draft,
    };
    let page = state.all_posts.execute(&params).await?;
    Ok(json_response(draft, PostPageDto::from(page)))
}

/// Slugs of every published post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/slugs",
    responses(
        (status = 200, description = "Published slugs", body = [String]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 502, description = "Content store unavailable", body = Error),
        (status = 504, description = "Content store timed out", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPublishedPostSlugs"
)]
#[get("/posts/slugs")]
pub async fn list_published_slugs(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let slugs: Vec<String> = state
        .published_slugs
        .execute()
        .await?
        .into_iter()
        .map(String::from)
        .collect();
    Ok(json_response(false, slugs))
}

/// Fetch one post by slug.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post", body = PostDto),
        (status = 404, description = "No such post", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 502, description = "Content store unavailable", body = Error),
        (status = 504, description = "Content store timed out", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPostBySlug"
)]
#[get("/posts/{slug}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let draft = session.is_draft_mode();
    let post = state.post_by_slug.execute(&slug, draft).await?;
    Ok(json_response(draft, PostDto::from(post)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::PreviewPolicy;
    use crate::domain::ports::{
        FixturePreviewAuthenticator, MockPostRepository, PostRepository, RepositoryError,
    };
    use crate::domain::{PostId, PostStatus, Slug};
    use crate::inbound::http::test_utils::test_session_middleware;

    fn post(slug: &str) -> Post {
        let at = DateTime::parse_from_rfc3339("2025-02-01T10:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        Post {
            id: PostId::new(1),
            title: "Hello".into(),
            slug: Slug::create(slug).expect("valid slug"),
            excerpt: Some("Intro".into()),
            content: json!({"root": {}}),
            hero_image: None,
            tags: vec!["rust".into()],
            authors: vec![PostAuthor {
                id: 2,
                name: Some("Ada".into()),
            }],
            status: PostStatus::Published,
            published_at: Some(at),
            created_at: at,
            updated_at: at,
        }
    }

    fn state(repo: MockPostRepository) -> HttpState {
        let repo: Arc<dyn PostRepository> = Arc::new(repo);
        HttpState::from_post_repository(
            repo,
            PreviewPolicy::disabled(),
            Arc::new(FixturePreviewAuthenticator::anonymous()),
        )
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(list_published_slugs)
                    .service(list_posts)
                    .service(get_post),
            )
    }

    #[actix_web::test]
    async fn get_post_returns_dto() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_slug()
            .withf(|_, draft| !*draft)
            .returning(|slug, _| Ok(Some(post(slug.as_ref()))));
        let app = actix_test::init_service(test_app(state(repo))).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/posts/hello")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(header::CACHE_CONTROL).is_none());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["slug"], "hello");
        assert_eq!(body["status"], "published");
        assert_eq!(body["authors"][0]["name"], "Ada");
    }

    #[rstest]
    #[case(RepositoryError::timeout("10s"), StatusCode::GATEWAY_TIMEOUT)]
    #[case(RepositoryError::unavailable("refused"), StatusCode::BAD_GATEWAY)]
    #[case(RepositoryError::forbidden("origin"), StatusCode::BAD_GATEWAY)]
    #[case(RepositoryError::mapping("bad doc"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_web::test]
    async fn get_post_maps_failures(
        #[case] failure: RepositoryError,
        #[case] expected: StatusCode,
    ) {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_slug()
            .returning(move |_, _| Err(failure.clone()));
        let app = actix_test::init_service(test_app(state(repo))).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/posts/hello")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn unknown_slug_is_404() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_slug().returning(|_, _| Ok(None));
        let app = actix_test::init_service(test_app(state(repo))).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/posts/missing")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["details"]["code"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn list_posts_forwards_query() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_all()
            .withf(|params| {
                params.page == 2
                    && params.limit == 5
                    && params.tag.as_deref() == Some("rust")
                    && !params.include_drafts
            })
            .times(1)
            .returning(|_| Ok(ContentPage::single(vec![post("hello")])));
        let app = actix_test::init_service(test_app(state(repo))).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/posts?page=2&limit=5&tag=rust")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: PostPageDto = actix_test::read_body_json(res).await;
        assert_eq!(body.docs.len(), 1);
        assert!(!body.has_next_page);
    }

    #[actix_web::test]
    async fn slugs_route_is_not_captured_by_slug_lookup() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_slug().never();
        repo.expect_find_published_slugs()
            .returning(|| Ok(vec![Slug::create("one").expect("valid")]));
        let app = actix_test::init_service(test_app(state(repo))).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/posts/slugs")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<String> = actix_test::read_body_json(res).await;
        assert_eq!(body, ["one"]);
    }
}
