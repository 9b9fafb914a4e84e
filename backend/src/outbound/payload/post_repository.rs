//! Payload-backed post repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::mappers::{post_from_doc, slug_from_doc};
use crate::domain::filters;
use crate::domain::ports::{
    ContentPage, ContentSource, PostListParams, PostRepository, RepositoryError,
};
use crate::domain::{Post, Slug};

/// Hard stop for the published-slug walk.
const MAX_SLUG_PAGES: u32 = 1_000;

/// Reads posts through a [`ContentSource`].
#[derive(Clone)]
pub struct PayloadPostRepository {
    source: Arc<dyn ContentSource>,
}

impl PayloadPostRepository {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl PostRepository for PayloadPostRepository {
    async fn find_by_slug(&self, slug: &Slug, draft: bool) -> Result<Option<Post>, RepositoryError> {
        let page = self.source.find(&filters::post_by_slug(slug, draft)).await?;
        page.docs.into_iter().next().map(post_from_doc).transpose()
    }

    async fn find_all(&self, params: &PostListParams) -> Result<ContentPage<Post>, RepositoryError> {
        let page = self.source.find(&filters::posts_page(params)).await?;
        page.try_map(post_from_doc)
    }

    async fn find_published_slugs(&self) -> Result<Vec<Slug>, RepositoryError> {
        let mut slugs = Vec::new();
        let mut page_number = 1;
        loop {
            let page = self
                .source
                .find(&filters::published_slugs(page_number))
                .await?;
            let last_page = page.total_pages.unwrap_or(u32::MAX);
            let has_more =
                page.has_more() && !page.docs.is_empty() && page_number < last_page;
            for doc in page.docs {
                slugs.push(slug_from_doc(doc)?);
            }
            if !has_more {
                break;
            }
            if page_number >= MAX_SLUG_PAGES {
                warn!(pages = page_number, "published slug listing never ended");
                return Err(RepositoryError::query(format!(
                    "published slug listing exceeded {MAX_SLUG_PAGES} pages"
                )));
            }
            page_number += 1;
        }
        debug!(count = slugs.len(), pages = page_number, "collected published slugs");
        Ok(slugs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        Collection, ContentSourceError, FixtureContentSource, MockContentSource, Where,
    };
    use rstest::rstest;
    use serde_json::{Value, json};

    fn post_doc(id: u64, slug: &str) -> Value {
        json!({
            "id": id,
            "title": format!("Post {id}"),
            "slug": slug,
            "content": {},
            "_status": "published",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        })
    }

    fn slug(value: &str) -> Slug {
        Slug::create(value).expect("valid slug")
    }

    #[tokio::test]
    async fn find_by_slug_maps_first_document() {
        let source = Arc::new(
            FixtureContentSource::default()
                .with_docs(Collection::Posts, vec![post_doc(1, "hello")]),
        );
        let repo = PayloadPostRepository::new(source.clone());

        let post = repo
            .find_by_slug(&slug("hello"), false)
            .await
            .expect("lookup succeeds")
            .expect("post present");
        assert_eq!(post.title, "Post 1");

        let queries = source.recorded_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].limit, Some(1));
        assert!(matches!(queries[0].where_clause, Some(Where::And(_))));
    }

    #[tokio::test]
    async fn find_by_slug_returns_none_for_empty_page() {
        let repo = PayloadPostRepository::new(Arc::new(FixtureContentSource::default()));
        let found = repo.find_by_slug(&slug("missing"), true).await.expect("ok");
        assert!(found.is_none());
    }

    #[rstest]
    #[case(ContentSourceError::timeout("10s"))]
    #[case(ContentSourceError::transport("refused"))]
    #[tokio::test]
    async fn source_errors_propagate(#[case] failure: ContentSourceError) {
        let expected = RepositoryError::from(failure.clone());
        let mut source = MockContentSource::new();
        source
            .expect_find()
            .returning(move |_| Err(failure.clone()));
        let repo = PayloadPostRepository::new(Arc::new(source));

        let err = repo
            .find_all(&PostListParams::default())
            .await
            .expect_err("failure propagates");
        assert_eq!(err, expected);
    }

    #[tokio::test]
    async fn unmappable_document_fails_the_listing() {
        let source = FixtureContentSource::default().with_docs(
            Collection::Posts,
            vec![post_doc(1, "fine"), json!({"id": 2, "slug": "broken"})],
        );
        let repo = PayloadPostRepository::new(Arc::new(source));
        let err = repo
            .find_all(&PostListParams::default())
            .await
            .expect_err("mapping fails");
        assert!(matches!(err, RepositoryError::Mapping { .. }));
    }

    #[tokio::test]
    async fn published_slugs_walk_every_page() {
        let mut source = MockContentSource::new();
        source.expect_find().times(2).returning(|query| {
            let page = query.page.unwrap_or(1);
            let doc = json!({"slug": format!("post-{page}")});
            Ok(ContentPage {
                docs: vec![doc],
                total_docs: 2,
                total_pages: Some(2),
                page: Some(page),
                has_next_page: Some(page < 2),
                has_prev_page: Some(page > 1),
            })
        });
        let repo = PayloadPostRepository::new(Arc::new(source));

        let slugs = repo.find_published_slugs().await.expect("slugs");
        let slugs: Vec<&str> = slugs.iter().map(AsRef::as_ref).collect();
        assert_eq!(slugs, ["post-1", "post-2"]);
    }

    fn endless_page(page: u32, total_pages: Option<u32>) -> ContentPage<Value> {
        ContentPage {
            docs: vec![json!({"slug": format!("post-{page}")})],
            total_docs: u64::MAX,
            total_pages,
            page: Some(page),
            has_next_page: Some(true),
            has_prev_page: Some(page > 1),
        }
    }

    #[tokio::test]
    async fn published_slugs_stop_at_the_reported_last_page() {
        let mut source = MockContentSource::new();
        source
            .expect_find()
            .times(3)
            .returning(|query| Ok(endless_page(query.page.unwrap_or(1), Some(3))));
        let repo = PayloadPostRepository::new(Arc::new(source));

        let slugs = repo.find_published_slugs().await.expect("slugs");
        assert_eq!(slugs.len(), 3);
    }

    #[tokio::test]
    async fn published_slugs_fail_when_paging_never_ends() {
        let mut source = MockContentSource::new();
        source
            .expect_find()
            .times(MAX_SLUG_PAGES as usize)
            .returning(|query| Ok(endless_page(query.page.unwrap_or(1), None)));
        let repo = PayloadPostRepository::new(Arc::new(source));

        let err = repo.find_published_slugs().await.expect_err("capped");
        assert!(matches!(err, RepositoryError::Query { .. }));
    }
}
