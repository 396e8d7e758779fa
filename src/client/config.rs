//! Configuration for the Hashgrid client.
//!
//! # Configuration Options
//!
//! | Option | Default | Env var |
//! |--------|---------|---------|
//! | `api_key` | none | `HASHGRID_API_KEY` |
//! | `base_url` | `https://dna.hashgrid.ai` | `HASHGRID_BASE_URL` |
//! | `timeout` | 30 s | `HASHGRID_TIMEOUT_SECS` |
//! | `poll_interval` | 30 s | `HASHGRID_POLL_INTERVAL_SECS` |
//! | `user_agent` | `hashgrid-rust/<version>` | none |
//!
//! # Examples
//!
//! ```
//! use hashgrid::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::default()
//!     .with_api_key("secret")
//!     .with_base_url("http://localhost:8080/")
//!     .with_timeout(Duration::from_secs(5));
//! assert_eq!(config.base_url, "http://localhost:8080");
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{HashgridError, Result};
use std::time::Duration;
use url::Url;

/// Default grid endpoint.
pub const DEFAULT_BASE_URL: &str = "https://dna.hashgrid.ai";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default tick polling interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for a [`Hashgrid`](crate::Hashgrid) client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Bearer token sent as `Authorization: Bearer <key>` when set
    pub api_key: Option<String>,
    /// Service root, without trailing slash
    pub base_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
    /// Default interval used by [`Grid::listen`](crate::Grid::listen)
    pub poll_interval: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            user_agent: concat!("hashgrid-rust/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

// The API key never ends up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Build a configuration from `HASHGRID_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();
        if let Some(key) = lookup("HASHGRID_API_KEY").filter(|k| !k.is_empty()) {
            config.api_key = Some(key);
        }
        if let Some(url) = lookup("HASHGRID_BASE_URL").filter(|u| !u.is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(secs) = lookup("HASHGRID_TIMEOUT_SECS") {
            config.timeout = parse_secs("HASHGRID_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("HASHGRID_POLL_INTERVAL_SECS") {
            config.poll_interval = parse_secs("HASHGRID_POLL_INTERVAL_SECS", &secs)?;
        }
        Ok(config)
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL. A trailing slash is stripped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default polling interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Check that the configuration can be used to open a session.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HashgridError::Config(format!(
                "unsupported scheme '{}' in base URL",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(HashgridError::Config("timeout must be non-zero".into()));
        }
        if self.poll_interval.is_zero() {
            return Err(HashgridError::Config("poll interval must be non-zero".into()));
        }
        Ok(())
    }
}

fn parse_secs(name: &str, value: &str) -> Result<Duration> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| HashgridError::Config(format!("{} is not a number: {}", name, value)))?;
    Duration::try_from_secs_f64(secs).map_err(|_| {
        HashgridError::Config(format!("{} must be a non-negative number: {}", name, value))
    })
}
