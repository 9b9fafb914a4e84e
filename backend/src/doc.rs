//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the posts API, the preview route and the health
//! probes. The generated document is served by Swagger UI in debug builds.

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::posts::{AuthorDto, MediaDto, MediaSizeDto, PostDto, PostPageDto};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the draft-mode session cookie.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Draft-mode session cookie issued by GET /preview.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Folio content API",
        description = "Blog posts served from Payload CMS, with draft preview."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::list_published_slugs,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::preview::enter_preview,
        crate::inbound::http::preview::exit_preview,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PostDto,
        PostPageDto,
        MediaDto,
        MediaSizeDto,
        AuthorDto,
        Error,
        ErrorCode
    )),
    tags(
        (name = "posts", description = "Published and draft blog posts"),
        (name = "preview", description = "Draft-mode entry and exit"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("PostDto", "slug")]
    #[case("PostDto", "status")]
    #[case("PostPageDto", "docs")]
    fn schemas_expose_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/v1/posts")]
    #[case("/api/v1/posts/slugs")]
    #[case("/api/v1/posts/{slug}")]
    #[case("/preview")]
    #[case("/preview/exit")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
