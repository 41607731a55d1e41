//! Client configuration
//!
//! The backend base URL is never ambient: it is resolved once (build env for
//! the web app, CLI flags/env for the terminal client) and handed to
//! `ApiService` at construction.

use std::time::Duration;
use url::Url;

use crate::shared::errors::ConfigError;

/// Local Flask dev server address used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: Url,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: &str, request_timeout: Duration) -> Result<Self, ConfigError> {
        if request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("0".to_string()));
        }

        Ok(Self {
            api_url: parse_base_url(api_url)?,
            request_timeout,
        })
    }

    /// Config baked in at compile time (`PDF_CHAT_API_URL`, `PDF_CHAT_TIMEOUT_SECS`)
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("PDF_CHAT_API_URL"), option_env!("PDF_CHAT_TIMEOUT_SECS"))
    }

    /// Build from optional raw values, falling back to defaults
    pub fn from_values(api_url: Option<&str>, timeout_secs: Option<&str>) -> Result<Self, ConfigError> {
        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL);

        let timeout = match timeout_secs.map(str::trim).filter(|t| !t.is_empty()) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Self::new(api_url, timeout)
    }

    /// Absolute URL of a backend endpoint, relative to the base URL path
    pub fn endpoint(&self, name: &str) -> Url {
        // Base always ends with '/', so join keeps any path prefix
        self.api_url
            .join(name.trim_start_matches('/'))
            .unwrap_or_else(|_| self.api_url.clone())
    }

    pub fn timeout_ms(&self) -> u64 {
        self.request_timeout.as_millis() as u64
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
