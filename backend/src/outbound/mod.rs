//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **payload**: Payload CMS REST adapters (content source, repositories,
//!   session authenticator).
//!
//! Adapters are thin translators between domain types and the CMS wire
//! format. They contain no business logic.

pub mod payload;
