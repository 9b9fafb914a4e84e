//! Driven port for the CMS query API.
//!
//! Repositories describe what they need as a [`ContentQuery`]; an adapter
//! executes it and returns raw JSON documents for the mappers to interpret.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;
use super::{Collection, ContentPage, ContentQuery};

define_port_error! {
    /// Failures raised while executing a CMS query.
    pub enum ContentSourceError {
        /// The CMS could not be reached or the connection broke.
        Transport { message: String } => "content source transport failed: {message}",
        /// The CMS did not answer within the configured timeout.
        Timeout { message: String } => "content source timed out: {message}",
        /// The CMS refused the request origin or credentials.
        Forbidden { message: String } => "content source refused the request: {message}",
        /// The CMS rejected the query.
        Rejected { message: String } => "content source rejected the query: {message}",
        /// The response body was not a valid result page.
        Decode { message: String } => "content source returned an invalid payload: {message}",
    }
}

/// Port for executing CMS queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run `query` and return the matching page of raw documents.
    async fn find(&self, query: &ContentQuery) -> Result<ContentPage<Value>, ContentSourceError>;
}

/// In-memory content source serving fixed documents per collection.
///
/// Filters are not evaluated: every query against a collection receives the
/// configured page. Executed queries are recorded for assertions.
///
/// # Examples
/// ```
/// use folio::domain::ports::{Collection, ContentQuery, ContentSource, FixtureContentSource};
/// use serde_json::json;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let source = FixtureContentSource::default()
///     .with_docs(Collection::Posts, vec![json!({ "id": 1 })]);
/// let page = source.find(&ContentQuery::new(Collection::Posts)).await.unwrap();
/// assert_eq!(page.docs.len(), 1);
/// assert_eq!(source.recorded_queries().len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct FixtureContentSource {
    pages: HashMap<Collection, ContentPage<Value>>,
    queries: Mutex<Vec<ContentQuery>>,
}

impl FixtureContentSource {
    /// Serve `docs` as a single page for `collection`.
    #[must_use]
    pub fn with_docs(self, collection: Collection, docs: Vec<Value>) -> Self {
        self.with_page(collection, ContentPage::single(docs))
    }

    /// Serve `page` verbatim for `collection`.
    #[must_use]
    pub fn with_page(mut self, collection: Collection, page: ContentPage<Value>) -> Self {
        self.pages.insert(collection, page);
        self
    }

    /// Queries executed so far, oldest first.
    pub fn recorded_queries(&self) -> Vec<ContentQuery> {
        match self.queries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl ContentSource for FixtureContentSource {
    async fn find(&self, query: &ContentQuery) -> Result<ContentPage<Value>, ContentSourceError> {
        match self.queries.lock() {
            Ok(mut guard) => guard.push(query.clone()),
            Err(poisoned) => poisoned.into_inner().push(query.clone()),
        }
        Ok(self
            .pages
            .get(&query.collection)
            .cloned()
            .unwrap_or_else(|| ContentPage::single(Vec::new())))
    }
}
