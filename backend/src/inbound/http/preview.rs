//! Preview route: switch an editor's browser into draft mode.
//!
//! ```text
//! GET /preview?previewSecret=...&slug=hello&collection=posts&path=/posts/hello
//! GET /preview/exit
//! ```
//!
//! Rejections answer a short `text/html` body and stop the chain.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::IntoParams;

use crate::domain::{PreviewRejection, PreviewRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const HTML: &str = "text/html; charset=utf-8";

/// Query string accepted by `GET /preview`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PreviewQuery {
    /// Shared secret configured in the CMS preview URL.
    pub preview_secret: Option<String>,
    pub slug: Option<String>,
    pub collection: Option<String>,
    /// Same-origin redirect target under `/posts/`.
    pub path: Option<String>,
}

impl From<PreviewQuery> for PreviewRequest {
    fn from(value: PreviewQuery) -> Self {
        Self {
            secret: value.preview_secret,
            slug: value.slug,
            collection: value.collection,
            path: value.path,
        }
    }
}

fn rejection_response(rejection: PreviewRejection) -> HttpResponse {
    let status = if rejection.is_forbidden() {
        StatusCode::FORBIDDEN
    } else {
        StatusCode::BAD_REQUEST
    };
    HttpResponse::build(status)
        .content_type(HTML)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(rejection.to_string())
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, location))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Validate a preview request and enable draft mode.
#[utoipa::path(
    get,
    path = "/preview",
    params(PreviewQuery),
    responses(
        (status = 307, description = "Draft mode enabled; redirect to the preview path"),
        (status = 400, description = "Malformed preview request", content_type = "text/html"),
        (status = 403, description = "Invalid secret or no CMS session", content_type = "text/html")
    ),
    tags = ["preview"],
    operation_id = "enterPreview",
    security([])
)]
#[get("/preview")]
pub async fn enter_preview(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    query: web::Query<PreviewQuery>,
) -> ApiResult<HttpResponse> {
    let request = PreviewRequest::from(query.into_inner());
    let target = match state.preview_policy.check(&request) {
        Ok(target) => target,
        Err(rejection) => {
            warn!(reason = %rejection, "preview request rejected");
            return Ok(rejection_response(rejection));
        }
    };

    let Some(cookies) = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
    else {
        warn!(slug = %target.slug, "preview request without cms session");
        return Ok(rejection_response(PreviewRejection::Unauthorized));
    };
    let user = match state.preview_auth.current_user(cookies).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!(slug = %target.slug, "preview request without cms session");
            return Ok(rejection_response(PreviewRejection::Unauthorized));
        }
        Err(error) => {
            warn!(slug = %target.slug, %error, "cms session lookup failed");
            return Ok(rejection_response(PreviewRejection::Unauthorized));
        }
    };

    session.enable_draft_mode()?;
    info!(
        user_id = %user.id(),
        collection = %target.collection,
        slug = %target.slug,
        "draft mode enabled"
    );
    Ok(redirect(&target.path))
}

/// Leave draft mode and return to the home page.
#[utoipa::path(
    get,
    path = "/preview/exit",
    responses((status = 307, description = "Draft mode cleared; redirect to /")),
    tags = ["preview"],
    operation_id = "exitPreview",
    security([])
)]
#[get("/preview/exit")]
pub async fn exit_preview(session: SessionContext) -> HttpResponse {
    session.disable_draft_mode();
    redirect("/")
}
