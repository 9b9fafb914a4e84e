//! HTTP inbound adapter exposing the preview route and the posts API.

pub mod error;
pub mod health;
pub mod posts;
pub mod preview;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
