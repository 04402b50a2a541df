//! Configuration structures for phpIPAM clients.
//!
//! [`PhpIpamConfig`] describes how to reach a phpIPAM installation: the
//! endpoint, the API application identifier, credentials and transport
//! settings. It can be deserialized from a configuration file, assembled with
//! the builder methods, or read from `PHPIPAM_*` environment variables.

use crate::client::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::warn;
use validator::Validate;

/// Environment variable holding the phpIPAM endpoint URL.
pub const ENV_URL: &str = "PHPIPAM_URL";
/// Environment variable holding the API application identifier.
pub const ENV_APP_ID: &str = "PHPIPAM_APP_ID";
/// Environment variable holding the username.
pub const ENV_USERNAME: &str = "PHPIPAM_USERNAME";
/// Environment variable holding the password.
pub const ENV_PASSWORD: &str = "PHPIPAM_PASSWORD";
/// Environment variable holding a static API token.
pub const ENV_TOKEN: &str = "PHPIPAM_TOKEN";
/// Environment variable disabling TLS certificate verification.
pub const ENV_INSECURE_TLS: &str = "PHPIPAM_INSECURE_TLS";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "PHPIPAM_TIMEOUT_SECS";

/// Connection settings for a phpIPAM client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PhpIpamConfig {
    /// phpIPAM base URL (e.g. `https://ipam.example.com`)
    #[validate(url)]
    pub url: String,

    /// API application identifier configured in phpIPAM
    #[validate(length(min = 1))]
    pub app_id: String,

    /// Username for token acquisition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for token acquisition
    #[serde(default, skip_serializing, deserialize_with = "opt_secret")]
    pub password: Option<SecretString>,

    /// Pre-issued static token (takes precedence over username/password)
    #[serde(default, skip_serializing, deserialize_with = "opt_secret")]
    pub token: Option<SecretString>,

    /// Accept invalid TLS certificates
    #[serde(default)]
    pub insecure_tls: bool,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional `User-Agent` override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn opt_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|secret| !secret.is_empty())
        .map(SecretString::from))
}

impl PhpIpamConfig {
    /// Create a configuration for the given endpoint and application id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL is invalid or the application
    /// id is empty.
    pub fn new(url: impl Into<String>, app_id: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            url: url.into(),
            app_id: app_id.into(),
            username: None,
            password: None,
            token: None,
            insecure_tls: false,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Read the configuration from `PHPIPAM_*` environment variables.
    ///
    /// `PHPIPAM_URL` and `PHPIPAM_APP_ID` are required.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`PhpIpamConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::ConfigError(format!("{key} is not set")))
        };

        let mut config = Self::new(required(ENV_URL)?, required(ENV_APP_ID)?)?;

        if let (Some(username), Some(password)) = (lookup(ENV_USERNAME), lookup(ENV_PASSWORD)) {
            config = config.with_credentials(username, password);
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|token| !token.is_empty()) {
            if config.username.is_some() {
                warn!("{ENV_TOKEN} is set; ignoring {ENV_USERNAME}/{ENV_PASSWORD}");
            }
            config = config.with_token(token);
        }
        if let Some(flag) = lookup(ENV_INSECURE_TLS) {
            config = config.with_insecure_tls(parse_flag(&flag));
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                Error::ConfigError(format!("{ENV_TIMEOUT_SECS} must be a number: {e}"))
            })?;
            config = config.with_timeout(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set username/password credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Set a static API token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Accept invalid TLS certificates.
    #[must_use]
    pub const fn with_insecure_tls(mut self, insecure: bool) -> Self {
        self.insecure_tls = insecure;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Derive the HTTP client settings for this configuration.
    #[must_use]
    pub fn http_config(&self) -> ClientConfig {
        let config = ClientConfig::new()
            .with_timeout(self.timeout())
            .with_insecure_tls(self.insecure_tls);
        match &self.user_agent {
            Some(agent) => config.with_user_agent(agent.clone()),
            None => config,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
