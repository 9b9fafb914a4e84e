//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Draft mode lives in the signed session cookie as a single boolean flag.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::Error;

pub(crate) const DRAFT_MODE_KEY: &str = "draft_mode";

/// Newtype wrapper exposing draft-mode operations on the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Switch the browser into draft mode.
    pub fn enable_draft_mode(&self) -> Result<(), Error> {
        self.0
            .insert(DRAFT_MODE_KEY, true)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Leave draft mode.
    pub fn disable_draft_mode(&self) {
        self.0.remove(DRAFT_MODE_KEY);
    }

    /// `true` when the session carries the draft-mode flag.
    ///
    /// An unreadable flag counts as published mode.
    pub fn is_draft_mode(&self) -> bool {
        match self.0.get::<bool>(DRAFT_MODE_KEY) {
            Ok(flag) => flag.unwrap_or(false),
            Err(error) => {
                warn!(%error, "invalid draft mode flag in session cookie");
                false
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/enable",
                web::get().to(|session: SessionContext| async move {
                    session.enable_draft_mode()?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/disable",
                web::get().to(|session: SessionContext| async move {
                    session.disable_draft_mode();
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/tampered",
                web::get().to(|session: Session| async move {
                    session
                        .insert(DRAFT_MODE_KEY, "yes")
                        .expect("set invalid flag");
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/status",
                web::get().to(|session: SessionContext| async move {
                    HttpResponse::Ok().body(session.is_draft_mode().to_string())
                }),
            )
    }

    /// Call `uri`, then report `/status` using whatever cookie it set.
    async fn status_after(uri: &str) -> String {
        let app = test::init_service(session_test_app()).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned());
        let mut req = test::TestRequest::get().uri("/status");
        if let Some(cookie) = cookie {
            req = req.cookie(cookie);
        }
        let res = test::call_service(&app, req.to_request()).await;
        String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8 body")
    }

    #[actix_web::test]
    async fn enabling_draft_mode_round_trips() {
        assert_eq!(status_after("/enable").await, "true");
    }

    #[actix_web::test]
    async fn fresh_session_is_not_in_draft_mode() {
        assert_eq!(status_after("/disable").await, "false");
    }

    #[actix_web::test]
    async fn tampered_flag_is_ignored() {
        assert_eq!(status_after("/tampered").await, "false");
    }
}
