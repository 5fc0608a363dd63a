//! Client configuration.

use crate::core::error::ClientError;

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Service origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.shieldcortex.ai";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "SHIELDCORTEX_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SHIELDCORTEX_BASE_URL";

/// Configuration for a [`ShieldCortex`](crate::ShieldCortex) client.
///
/// Resolved once at construction; every request reads it and nothing
/// mutates it afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer credential (kept secret).
    pub api_key: SecretString,

    /// Service origin, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,

    /// `User-Agent` sent with every request.
    pub user_agent: String,

    /// Extra headers applied after the defaults; these win on conflict.
    pub extra_headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Creates a configuration with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into().into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("shieldcortex-rust/{}", env!("CARGO_PKG_VERSION")),
            extra_headers: Vec::new(),
        }
    }

    /// Builds a configuration from `SHIELDCORTEX_API_KEY` and the optional
    /// `SHIELDCORTEX_BASE_URL`.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| ClientError::configuration(format!("{} is not set", API_KEY_ENV)))?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        config.validate()?;
        Ok(config)
    }

    /// Sets the base URL. Trailing slashes are stripped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Returns the `Authorization` header value.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// Checks the configuration before any request is made.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ClientError::configuration("API key must not be empty"));
        }

        let parsed = Url::parse(&self.base_url).map_err(|e| {
            ClientError::configuration(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::configuration(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::configuration("timeout must be non-zero"));
        }

        Ok(())
    }
}

/// Strips trailing slashes from a base URL.
///
/// Idempotent: normalizing an already normalized URL is a no-op.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
