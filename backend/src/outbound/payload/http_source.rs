//! Reqwest-backed Payload content source.
//!
//! This adapter owns transport details only: query string encoding, timeout
//! and HTTP error mapping, and decoding the paginated envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use super::dto::PageDto;
use super::query_string::query_pairs;
use super::session_auth::PayloadSessionAuthenticator;
use crate::domain::ports::{ContentPage, ContentQuery, ContentSource, ContentSourceError};

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Content source issuing `GET /api/{collection}` requests against Payload.
#[derive(Clone)]
pub struct PayloadHttpSource {
    client: Client,
    base: Url,
    api_key: Option<HeaderValue>,
}

impl PayloadHttpSource {
    /// Build a source for the Payload instance served at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
            api_key: None,
        })
    }

    /// Authenticate reads with a Payload `users` API key so drafts are visible.
    ///
    /// Keys that are not valid header values are ignored.
    #[must_use]
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = HeaderValue::from_str(&format!("users API-Key {api_key}"))
            .ok()
            .map(|mut value| {
                value.set_sensitive(true);
                value
            });
        self
    }

    /// Session authenticator sharing this source's connection pool.
    pub fn session_authenticator(&self) -> PayloadSessionAuthenticator {
        PayloadSessionAuthenticator::new(self.client.clone(), self.base.clone())
    }

    fn collection_url(&self, query: &ContentQuery) -> Result<Url, ContentSourceError> {
        self.base
            .join(&format!("api/{}", query.collection))
            .map_err(|err| ContentSourceError::rejected(format!("invalid collection url: {err}")))
    }
}

pub(super) fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[async_trait]
impl ContentSource for PayloadHttpSource {
    async fn find(&self, query: &ContentQuery) -> Result<ContentPage<Value>, ContentSourceError> {
        let url = self.collection_url(query)?;
        let pairs = query_pairs(query);
        debug!(collection = %query.collection, params = pairs.len(), "querying payload");

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&pairs);
        if let Some(api_key) = &self.api_key {
            request = request.header(AUTHORIZATION, api_key.clone());
        }
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_page(body.as_ref())
    }
}

fn parse_page(body: &[u8]) -> Result<ContentPage<Value>, ContentSourceError> {
    let page: PageDto = serde_json::from_slice(body).map_err(|error| {
        ContentSourceError::decode(format!("invalid Payload JSON payload: {error}"))
    })?;
    Ok(page.into())
}

pub(super) fn map_transport_error(error: reqwest::Error) -> ContentSourceError {
    if error.is_timeout() {
        ContentSourceError::timeout(error.to_string())
    } else {
        ContentSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ContentSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ContentSourceError::forbidden(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ContentSourceError::timeout(message)
        }
        _ if status.is_client_error() => ContentSourceError::rejected(message),
        _ => ContentSourceError::transport(message),
    }
}

pub(super) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Non-network coverage for the Payload transport helpers.

    use super::*;
    use crate::domain::ports::Collection;
    use rstest::rstest;

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, "Forbidden")]
    #[case::forbidden(StatusCode::FORBIDDEN, "Forbidden")]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "Timeout")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "Rejected")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Transport")]
    fn maps_http_statuses_to_expected_domain_errors(
        #[case] status: StatusCode,
        #[case] expected: &str,
    ) {
        let error = map_status_error(status, b"{\"errors\":[{\"message\":\"nope\"}]}");
        let matched = match expected {
            "Forbidden" => matches!(error, ContentSourceError::Forbidden { .. }),
            "Timeout" => matches!(error, ContentSourceError::Timeout { .. }),
            "Rejected" => matches!(error, ContentSourceError::Rejected { .. }),
            "Transport" => matches!(error, ContentSourceError::Transport { .. }),
            _ => panic!("unsupported test expectation: {expected}"),
        };
        assert!(matched, "{status} mapped to {error:?}");
    }

    #[test]
    fn parses_paginated_envelope() {
        let body = br#"{
            "docs": [{"id": 1}, {"id": 2}],
            "totalDocs": 12,
            "totalPages": 6,
            "page": 1,
            "hasNextPage": true,
            "hasPrevPage": false,
            "limit": 2
        }"#;
        let page = parse_page(body).expect("page decodes");
        assert_eq!(page.docs.len(), 2);
        assert_eq!(page.total_docs, 12);
        assert!(page.has_more());
    }

    #[test]
    fn rejects_non_json_body() {
        let error = parse_page(b"<html>oops</html>").expect_err("decode fails");
        assert!(matches!(error, ContentSourceError::Decode { .. }));
    }

    #[test]
    fn truncates_long_bodies_in_previews() {
        let body = "x ".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[rstest]
    #[case("http://cms.internal", "http://cms.internal/api/posts")]
    #[case("http://cms.internal/payload", "http://cms.internal/payload/api/posts")]
    fn joins_collection_under_base(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("valid url");
        let source = PayloadHttpSource::new(base, Duration::from_secs(1)).expect("client builds");
        let url = source
            .collection_url(&ContentQuery::new(Collection::Posts))
            .expect("url joins");
        assert_eq!(url.as_str(), expected);
    }
}
