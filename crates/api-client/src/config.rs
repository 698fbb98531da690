//! Client configuration
//!
//! Loaded from a TOML file or from the environment:
//!
//! ```toml
//! base_url = "https://oscal.example.gov"
//! timeout_ms = 10000
//! mock_fallback = true
//! ```

use crate::error::{ApiError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const ENV_API_URL: &str = "OSCAL_API_URL";
pub const ENV_TIMEOUT_MS: &str = "OSCAL_API_TIMEOUT_MS";
pub const ENV_MOCK_FALLBACK: &str = "OSCAL_MOCK_FALLBACK";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend root, without the `/api` suffix (default: http://localhost:8080)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds (default: 30000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Answer template reads from the built-in registry when the backend is
    /// unreachable
    #[serde(default)]
    pub mock_fallback: bool,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            mock_fallback: false,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_mock_fallback(mut self, enabled: bool) -> Self {
        self.mock_fallback = enabled;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `OSCAL_API_URL`, `OSCAL_API_TIMEOUT_MS` and
    /// `OSCAL_MOCK_FALLBACK`
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] with an explicit variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = timeout.trim().parse().map_err(|_| {
                ApiError::Config(format!("{} must be a number, got '{}'", ENV_TIMEOUT_MS, timeout))
            })?;
        }
        if let Some(flag) = lookup(ENV_MOCK_FALLBACK) {
            config.mock_fallback = parse_flag(&flag).ok_or_else(|| {
                ApiError::Config(format!("{} must be true or false, got '{}'", ENV_MOCK_FALLBACK, flag))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ApiError::Config("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Absolute URL for an endpoint path such as `/api/templates`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn endpoint_has_single_separator(
            host in "[a-z]{1,10}",
            trailing in 0usize..3,
            leading in 0usize..3,
            path in "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
        ) {
            let base = format!("http://{}{}", host, "/".repeat(trailing));
            let config = ClientConfig::new(base);
            let url = config.endpoint(&format!("{}{}", "/".repeat(leading), path));
            prop_assert_eq!(url, format!("http://{}/{}", host, path));
        }
    }
}
