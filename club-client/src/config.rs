//! Client configuration

use crate::{ClientError, ClientResult, NetworkHttpClient};
use chrono_tz::Tz;

/// Environment variable names read by [`ClientConfig::from_env`]
pub const ENV_BASE_URL: &str = "CLUB_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CLUB_API_TIMEOUT_SECS";
pub const ENV_TOKEN: &str = "CLUB_API_TOKEN";
pub const ENV_TIMEZONE: &str = "CLUB_TIMEZONE";

/// Client configuration for connecting to the club backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Bearer token, when the session is not cookie based
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Keep the backend's session cookies between requests
    pub cookies: bool,

    /// Club timezone, used to render booking times
    pub timezone: Tz,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            cookies: true,
            timezone: Tz::UTC,
        }
    }

    /// Load from process environment
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | CLUB_API_BASE_URL | http://localhost:8080 |
    /// | CLUB_API_TIMEOUT_SECS | 30 |
    /// | CLUB_API_TOKEN | (none) |
    /// | CLUB_TIMEZONE | UTC |
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            if url.trim().is_empty() {
                return Err(ClientError::Config(format!("{ENV_BASE_URL} is empty")));
            }
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    ClientError::Config(format!(
                        "{ENV_TIMEOUT_SECS} must be a positive integer, got {raw:?}"
                    ))
                })?;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.trim().is_empty()) {
            config.token = Some(token);
        }
        if let Some(raw) = lookup(ENV_TIMEZONE) {
            config.timezone = raw
                .trim()
                .parse::<Tz>()
                .map_err(|_| ClientError::Config(format!("unknown timezone {raw:?}")))?;
        }

        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_cookies(mut self, enabled: bool) -> Self {
        self.cookies = enabled;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
