//! Driven port resolving the CMS session behind a preview request.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Failures raised while resolving a CMS session.
    pub enum PreviewAuthError {
        /// The CMS could not be asked about the session.
        Unavailable { message: String } => "session lookup unavailable: {message}",
        /// The CMS answered with something other than a session payload.
        InvalidResponse { message: String } => "session lookup returned an invalid payload: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreviewAuthenticator: Send + Sync {
    /// Resolve the CMS user owning the session carried by `cookie_header`.
    ///
    /// Returns `Ok(None)` when the cookies carry no valid session.
    async fn current_user(&self, cookie_header: &str) -> Result<Option<User>, PreviewAuthError>;
}

/// Authenticator answering with a fixed user, regardless of cookies.
#[derive(Debug, Clone, Default)]
pub struct FixturePreviewAuthenticator {
    user: Option<User>,
}

impl FixturePreviewAuthenticator {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl PreviewAuthenticator for FixturePreviewAuthenticator {
    async fn current_user(&self, _cookie_header: &str) -> Result<Option<User>, PreviewAuthError> {
        Ok(self.user.clone())
    }
}
