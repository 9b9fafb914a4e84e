//! Folio content backend library modules.
//!
//! The crate is a hexagonal modular monolith: [`domain`] holds entities,
//! validation, use cases and ports; [`outbound`] implements the ports against
//! Payload CMS; [`inbound`] exposes them over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
