//! Resolve Payload sessions through `GET /api/users/me`.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::MeDto;
use super::http_source::{body_preview, map_transport_error, with_trailing_slash};
use super::mappers::user_from_doc;
use crate::domain::User;
use crate::domain::ports::{PreviewAuthError, PreviewAuthenticator};

/// Authenticator forwarding the browser's cookies to Payload.
#[derive(Clone)]
pub struct PayloadSessionAuthenticator {
    client: Client,
    base: Url,
}

impl PayloadSessionAuthenticator {
    pub fn new(client: Client, base: Url) -> Self {
        Self {
            client,
            base: with_trailing_slash(base),
        }
    }
}

#[async_trait]
impl PreviewAuthenticator for PayloadSessionAuthenticator {
    async fn current_user(&self, cookie_header: &str) -> Result<Option<User>, PreviewAuthError> {
        let url = self
            .base
            .join("api/users/me")
            .map_err(|err| PreviewAuthError::unavailable(err.to_string()))?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(COOKIE, cookie_header)
            .send()
            .await
            .map_err(|err| PreviewAuthError::unavailable(map_transport_error(err).to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| PreviewAuthError::unavailable(err.to_string()))?;
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            debug!(status = status.as_u16(), "payload refused session lookup");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PreviewAuthError::unavailable(format!(
                "status {}: {}",
                status.as_u16(),
                body_preview(body.as_ref())
            )));
        }
        parse_me(body.as_ref())
    }
}

fn parse_me(body: &[u8]) -> Result<Option<User>, PreviewAuthError> {
    let me: MeDto = serde_json::from_slice(body)
        .map_err(|err| PreviewAuthError::invalid_response(err.to_string()))?;
    match me.user {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(doc) => user_from_doc(doc)
            .map(Some)
            .map_err(|err| PreviewAuthError::invalid_response(err.to_string())),
    }
}
