//! Environment-driven settings for the HTTP server.
//!
//! Production (`NODE_ENV=production`) rejects missing or malformed values;
//! development logs a warning and falls back to a default instead.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::Key;
use folio::domain::PreviewPolicy;
use mockable::Env;
use tracing::warn;
use url::Url;
use zeroize::Zeroizing;

pub(crate) const NODE_ENV: &str = "NODE_ENV";
pub(crate) const PAYLOAD_SECRET_ENV: &str = "PAYLOAD_SECRET";
pub(crate) const PREVIEW_SECRET_ENV: &str = "PAYLOAD_PREVIEW_SECRET";
pub(crate) const SITE_URL_ENV: &str = "NEXT_PUBLIC_SITE_URL";
pub(crate) const VERCEL_URL_ENV: &str = "VERCEL_URL";
pub(crate) const PAYLOAD_URL_ENV: &str = "PAYLOAD_URL";
pub(crate) const PAYLOAD_API_KEY_ENV: &str = "PAYLOAD_API_KEY";
pub(crate) const TIMEOUT_ENV: &str = "PAYLOAD_TIMEOUT_SECS";
pub(crate) const BIND_ADDR_ENV: &str = "BIND_ADDR";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";

/// Minimum `PAYLOAD_SECRET` length accepted for cookie key derivation.
pub(crate) const SECRET_MIN_LEN: usize = 32;
const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Validation strictness selected by `NODE_ENV`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or invalid values warn and fall back to defaults.
    Development,
    /// Missing or invalid values are fatal.
    Production,
}

impl BuildMode {
    /// `Production` when `NODE_ENV` is `production`, otherwise `Development`.
    pub fn from_env<E: Env>(env: &E) -> Self {
        match env.string(NODE_ENV) {
            Some(value) if value.trim().eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Errors raised while validating the environment.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but malformed.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// A secret is shorter than the key derivation accepts.
    #[error("{name} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        name: &'static str,
        length: usize,
        min_len: usize,
    },
}

/// Validated server settings.
pub struct AppSettings {
    pub mode: BuildMode,
    pub bind_addr: SocketAddr,
    /// Public site origin.
    pub site_url: Url,
    /// Origin of the Payload REST API.
    pub payload_url: Url,
    pub payload_timeout: Duration,
    pub payload_api_key: Option<Zeroizing<String>>,
    /// Signing and encryption key for the session cookie.
    pub session_key: Key,
    pub cookie_secure: bool,
    preview_secret: Option<Zeroizing<String>>,
}

impl AppSettings {
    /// Read and validate every setting from `env`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when production mode finds a missing or
    /// malformed value.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ConfigError> {
        let site_url = site_url_from_env(env, mode)?;
        let payload_url = match non_blank(env, PAYLOAD_URL_ENV) {
            Some(value) => parse_url(PAYLOAD_URL_ENV, value, mode, site_url.clone())?,
            None => site_url.clone(),
        };
        let cookie_secure = cookie_secure_from_env(env, mode, &site_url)?;

        Ok(Self {
            mode,
            bind_addr: bind_addr_from_env(env, mode)?,
            payload_timeout: timeout_from_env(env, mode)?,
            payload_api_key: non_blank(env, PAYLOAD_API_KEY_ENV).map(Zeroizing::new),
            session_key: session_key_from_env(env, mode)?,
            preview_secret: preview_secret_from_env(env, mode)?,
            cookie_secure,
            site_url,
            payload_url,
        })
    }

    /// Preview gate built from `PAYLOAD_PREVIEW_SECRET`.
    pub fn preview_policy(&self) -> PreviewPolicy {
        self.preview_secret
            .as_deref()
            .map_or_else(PreviewPolicy::disabled, |secret| {
                PreviewPolicy::with_secret(secret)
            })
    }
}

/// Development fallback, production failure.
fn lenient<T>(mode: BuildMode, fallback: T, error: ConfigError) -> Result<T, ConfigError> {
    if mode.is_production() {
        return Err(error);
    }
    warn!(error = %error, "using development default");
    Ok(fallback)
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_url(
    name: &'static str,
    value: String,
    mode: BuildMode,
    fallback: Url,
) -> Result<Url, ConfigError> {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => lenient(
            mode,
            fallback,
            ConfigError::InvalidEnv {
                name,
                value,
                expected: "absolute http(s) URL",
            },
        ),
    }
}

fn default_site_url() -> Result<Url, ConfigError> {
    Url::parse(DEFAULT_SITE_URL).map_err(|_| ConfigError::InvalidEnv {
        name: SITE_URL_ENV,
        value: DEFAULT_SITE_URL.to_owned(),
        expected: "absolute http(s) URL",
    })
}

fn site_url_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Url, ConfigError> {
    let fallback = default_site_url()?;
    if let Some(value) = non_blank(env, SITE_URL_ENV) {
        return parse_url(SITE_URL_ENV, value, mode, fallback);
    }
    if let Some(host) = non_blank(env, VERCEL_URL_ENV) {
        return parse_url(VERCEL_URL_ENV, format!("https://{host}"), mode, fallback);
    }
    Ok(fallback)
}

fn bind_addr_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<SocketAddr, ConfigError> {
    let fallback = SocketAddr::from(([0, 0, 0, 0], 8080));
    let Some(value) = non_blank(env, BIND_ADDR_ENV) else {
        return Ok(fallback);
    };
    value.parse().or_else(|_| {
        lenient(
            mode,
            fallback,
            ConfigError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value,
                expected: DEFAULT_BIND_ADDR,
            },
        )
    })
}

fn timeout_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, ConfigError> {
    let fallback = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
    let Some(value) = non_blank(env, TIMEOUT_ENV) else {
        return Ok(fallback);
    };
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => lenient(
            mode,
            fallback,
            ConfigError::InvalidEnv {
                name: TIMEOUT_ENV,
                value,
                expected: "positive whole seconds",
            },
        ),
    }
}

fn cookie_secure_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    site_url: &Url,
) -> Result<bool, ConfigError> {
    let fallback = mode.is_production() || site_url.scheme() == "https";
    let Some(value) = non_blank(env, COOKIE_SECURE_ENV) else {
        return Ok(fallback);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => lenient(
            mode,
            fallback,
            ConfigError::InvalidEnv {
                name: COOKIE_SECURE_ENV,
                value,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

fn session_key_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Key, ConfigError> {
    let secret = env.string(PAYLOAD_SECRET_ENV).map(Zeroizing::new);
    let error = match secret.as_deref() {
        Some(value) if value.len() >= SECRET_MIN_LEN => {
            return Ok(Key::derive_from(value.as_bytes()));
        }
        Some(value) => ConfigError::SecretTooShort {
            name: PAYLOAD_SECRET_ENV,
            length: value.len(),
            min_len: SECRET_MIN_LEN,
        },
        None => ConfigError::MissingEnv {
            name: PAYLOAD_SECRET_ENV,
        },
    };
    if mode.is_production() {
        return Err(error);
    }
    warn!(error = %error, "using temporary session key (dev only)");
    Ok(Key::generate())
}

fn preview_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Option<Zeroizing<String>>, ConfigError> {
    match non_blank(env, PREVIEW_SECRET_ENV) {
        Some(secret) => Ok(Some(Zeroizing::new(secret))),
        None if mode.is_production() => Err(ConfigError::MissingEnv {
            name: PREVIEW_SECRET_ENV,
        }),
        None => {
            warn!("PAYLOAD_PREVIEW_SECRET not set; preview requests will be rejected");
            Ok(None)
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
