//! Coarse failure codes returned by content use cases.
//!
//! Use cases collapse adapter failures into a handful of codes that pages
//! can render (not found, network, timeout and so on) without knowing which
//! adapter produced them.

use std::fmt;

use serde::Serialize;

/// Stable use-case failure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentErrorCode {
    NotFound,
    Unknown,
    DbError,
    NetworkError,
    Timeout,
    CorsError,
}

impl ContentErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Unknown => "UNKNOWN",
            Self::DbError => "DB_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::CorsError => "CORS_ERROR",
        }
    }
}

impl fmt::Display for ContentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Use-case failure: a code plus a diagnostic message for logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ContentError {
    code: ContentErrorCode,
    message: String,
}

impl ContentError {
    pub fn new(code: ContentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ContentErrorCode::NotFound, message)
    }

    pub fn code(&self) -> ContentErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
