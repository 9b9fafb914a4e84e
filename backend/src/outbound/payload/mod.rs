//! Payload CMS outbound adapters.
//!
//! [`PayloadHttpSource`] executes [`crate::domain::ports::ContentQuery`]
//! values against the Payload REST API. The repositories translate port
//! calls into queries and map the returned documents into entities.

mod dto;
mod http_source;
mod mappers;
mod media_repository;
mod post_repository;
mod query_string;
mod session_auth;
mod user_repository;

pub use http_source::PayloadHttpSource;
pub use media_repository::PayloadMediaRepository;
pub use post_repository::PayloadPostRepository;
pub use session_auth::PayloadSessionAuthenticator;
pub use user_repository::PayloadUserRepository;
