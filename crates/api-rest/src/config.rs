//! REST server configuration.
//!
//! Resolved once at process startup and then passed in. Nothing here reads environment
//! variables; the binary reads them and hands the raw values to
//! [`rest_config_from_env_values`].

use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Address used when `TRIAGE_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid REST address '{value}': {source}")]
    InvalidAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid CORS origin '{0}' (expected http:// or https:// origin)")]
    InvalidOrigin(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Clone, Debug)]
pub struct RestConfig {
    addr: SocketAddr,
    /// Empty means any origin is allowed.
    cors_origins: Vec<HeaderValue>,
}

impl RestConfig {
    pub fn new(addr: SocketAddr, cors_origins: Vec<HeaderValue>) -> Self {
        Self { addr, cors_origins }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn cors_origins(&self) -> &[HeaderValue] {
        &self.cors_origins
    }

    pub fn cors_layer(&self) -> CorsLayer {
        if self.cors_origins.is_empty() {
            return CorsLayer::permissive();
        }

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.cors_origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Builds a [`RestConfig`] from optional raw environment values.
///
/// Blank values count as unset. `origins` is a comma-separated list.
pub fn rest_config_from_env_values(
    addr: Option<String>,
    origins: Option<String>,
) -> ConfigResult<RestConfig> {
    let addr = addr
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
    let addr = addr
        .parse::<SocketAddr>()
        .map_err(|source| ConfigError::InvalidAddress {
            value: addr.clone(),
            source,
        })?;

    let cors_origins = origins
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(parse_origin)
        .collect::<ConfigResult<Vec<_>>>()?;

    Ok(RestConfig::new(addr, cors_origins))
}

fn parse_origin(origin: &str) -> ConfigResult<HeaderValue> {
    if !(origin.starts_with("http://") || origin.starts_with("https://")) {
        return Err(ConfigError::InvalidOrigin(origin.to_string()));
    }
    HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
}
