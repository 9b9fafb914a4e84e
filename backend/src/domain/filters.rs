//! Query builders for the post reads issued by the repositories.

use super::Slug;
use super::ports::{Collection, ContentQuery, PostListParams, Where};

/// Field carrying the CMS editorial status.
pub const STATUS_FIELD: &str = "_status";
/// Newest posts first.
pub const NEWEST_FIRST: &str = "-publishedAt";
/// Relationship depth needed to populate hero images and authors.
pub const POST_DEPTH: u32 = 2;
/// Page size used when walking every published slug.
pub const SLUG_BATCH_SIZE: u32 = 100;

/// Clause matching published posts.
pub fn published() -> Where {
    Where::equals(STATUS_FIELD, "published")
}

/// Query for the post with `slug`.
///
/// Outside draft mode the query also requires a published status so a
/// draft-only post stays hidden.
pub fn post_by_slug(slug: &Slug, draft: bool) -> ContentQuery {
    let mut clauses = vec![Where::equals("slug", slug.as_ref())];
    if !draft {
        clauses.push(published());
    }
    ContentQuery::new(Collection::Posts)
        .filter(Where::all(clauses))
        .limit(1)
        .draft(draft)
        .depth(POST_DEPTH)
}

/// Query for one page of the post listing.
pub fn posts_page(params: &PostListParams) -> ContentQuery {
    let params = params.normalised();
    let mut clauses = Vec::new();
    if !params.include_drafts {
        clauses.push(published());
    }
    if let Some(tag) = params.tag {
        clauses.push(Where::equals("tags.tag", tag));
    }
    ContentQuery::new(Collection::Posts)
        .filter(Where::all(clauses))
        .limit(params.limit)
        .page(params.page)
        .sort(NEWEST_FIRST)
        .draft(params.include_drafts)
        .depth(POST_DEPTH)
}

/// Query for page `page` of published slugs, fetching only the slug field.
pub fn published_slugs(page: u32) -> ContentQuery {
    ContentQuery::new(Collection::Posts)
        .filter(Some(published()))
        .limit(SLUG_BATCH_SIZE)
        .page(page.max(1))
        .sort(NEWEST_FIRST)
        .depth(0)
        .select(["slug"])
}
