//! Runtime configuration for the Draft tool adapter and the GitHub client.
//!
//! Both configurations have sensible defaults, deserialise from JSON (all
//! fields optional), and can be overlaid from environment variables.

use camino::Utf8PathBuf;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default bound, in seconds, for external calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable naming the Draft binary.
pub const DRAFT_BINARY_ENV: &str = "DRAFT_BINARY";

/// Environment variable bounding Draft invocations, in seconds.
pub const DRAFT_TIMEOUT_ENV: &str = "DRAFT_TIMEOUT_SECS";

/// Environment variable overriding the GitHub API base URL.
pub const GITHUB_API_URL_ENV: &str = "DRAFTKIT_GITHUB_API_URL";

/// Environment variable bounding GitHub requests, in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "DRAFTKIT_REQUEST_TIMEOUT_SECS";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A timeout variable is not a positive integer.
    #[error("{name} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout {
        /// Variable name.
        name: String,
        /// Raw value.
        value: String,
    },

    /// A variable holds non-unicode data.
    #[error("{name} is not valid unicode")]
    NotUnicode {
        /// Variable name.
        name: String,
    },

    /// The API base URL is not an absolute `http`/`https` URL.
    #[error("invalid GitHub API base URL '{0}'")]
    InvalidApiUrl(String),
}

/// Configuration for invoking the Draft command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftToolConfig {
    /// Binary name or path of the Draft tool.
    pub binary: Utf8PathBuf,
    /// Upper bound for a single invocation, in seconds.
    #[serde(deserialize_with = "positive_secs")]
    pub timeout_secs: u64,
}

impl Default for DraftToolConfig {
    fn default() -> Self {
        Self {
            binary: Utf8PathBuf::from("draft"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DraftToolConfig {
    /// Returns the invocation timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Overrides the Draft binary.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<Utf8PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Overrides the invocation timeout. A zero value is ignored.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        if timeout_secs > 0 {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    /// Builds a configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(read_env)
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Result<Option<String>, ConfigError>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(binary) = lookup(DRAFT_BINARY_ENV)?.filter(|value| !value.trim().is_empty()) {
            config.binary = Utf8PathBuf::from(binary.trim());
        }
        if let Some(raw) = lookup(DRAFT_TIMEOUT_ENV)? {
            config.timeout_secs = parse_timeout(DRAFT_TIMEOUT_ENV, &raw)?;
        }
        Ok(config)
    }
}

/// Configuration for the secret provisioner and its GitHub client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionerConfig {
    /// GitHub REST API base URL.
    pub api_base_url: String,
    /// Upper bound for key-fetch and submission requests, in seconds.
    #[serde(deserialize_with = "positive_secs")]
    pub request_timeout_secs: u64,
    /// `User-Agent` sent with API requests.
    pub user_agent: String,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_GITHUB_API_URL.to_owned(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("draftkit/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl ProvisionerConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Overrides the request timeout. A zero value is ignored.
    #[must_use]
    pub const fn with_request_timeout_secs(mut self, timeout_secs: u64) -> Self {
        if timeout_secs > 0 {
            self.request_timeout_secs = timeout_secs;
        }
        self
    }

    /// Parses and validates the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] for relative, malformed, or
    /// non-HTTP URLs.
    pub fn api_url(&self) -> Result<reqwest::Url, ConfigError> {
        let url = reqwest::Url::parse(&self.api_base_url)
            .map_err(|_| ConfigError::InvalidApiUrl(self.api_base_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiUrl(self.api_base_url.clone()));
        }
        Ok(url)
    }

    /// Builds a configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(read_env)
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Result<Option<String>, ConfigError>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(GITHUB_API_URL_ENV)? {
            config.api_base_url = url.trim().to_owned();
            config.api_url()?;
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV)? {
            config.request_timeout_secs = parse_timeout(REQUEST_TIMEOUT_ENV, &raw)?;
        }
        Ok(config)
    }
}

/// Reads a process environment variable, treating absence as `None`.
///
/// # Errors
///
/// Returns [`ConfigError::NotUnicode`] when the value is not valid unicode.
pub fn read_env(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
            name: name.to_owned(),
        }),
    }
}

fn positive_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    if secs == 0 {
        return Err(de::Error::invalid_value(
            de::Unexpected::Unsigned(0),
            &"a positive number of seconds",
        ));
    }
    Ok(secs)
}

fn parse_timeout(name: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidTimeout {
            name: name.to_owned(),
            value: raw.to_owned(),
        }),
    }
}
