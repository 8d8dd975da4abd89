//! Client configuration

use std::{fmt, path::Path, time::Duration};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Default Discord API base URL (unversioned)
pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api";

/// Default Discord API version
pub const DEFAULT_API_VERSION: &str = "v10";

/// Construction options for [`OAuthClient`](crate::OAuthClient)
///
/// Every field is optional. Durations are expressed in milliseconds when
/// loaded from YAML or the environment.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API version path segment (`v10`)
    pub version: String,

    /// Default application client ID
    #[serde(deserialize_with = "deserialize_snowflake")]
    pub client_id: Option<String>,

    /// Default redirect URI for code exchange and authorization URLs
    pub redirect_uri: Option<String>,

    /// Precomputed base64 `client_id:client_secret` for Basic auth
    pub credentials: Option<String>,

    /// Default application client secret
    pub client_secret: Option<String>,

    /// Per-request timeout
    #[serde(with = "duration_ms")]
    pub request_timeout: Duration,

    /// Round-trip latency above which a warning is emitted
    #[serde(with = "duration_ms")]
    pub latency_threshold: Duration,

    /// Added to every wait derived from rate-limit headers or `retry_after`
    #[serde(with = "duration_ms")]
    pub ratelimiter_offset: Duration,

    /// Unversioned API base URL
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_API_VERSION.to_string(),
            client_id: None,
            redirect_uri: None,
            credentials: None,
            client_secret: None,
            request_timeout: Duration::from_secs(15),
            latency_threshold: Duration::from_secs(30),
            ratelimiter_offset: Duration::ZERO,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("version", &self.version)
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("credentials", &self.credentials.as_ref().map(|_| "[REDACTED]"))
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout", &self.request_timeout)
            .field("latency_threshold", &self.latency_threshold)
            .field("ratelimiter_offset", &self.ratelimiter_offset)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from an optional YAML file and the environment
    ///
    /// Environment variables use the `DISCORD_OAUTH_` prefix, e.g.
    /// `DISCORD_OAUTH_CLIENT_ID` or `DISCORD_OAUTH_REQUEST_TIMEOUT=5000`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        figment = figment.merge(Env::prefixed("DISCORD_OAUTH_"));

        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that would make every request fail
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty version, an unparseable base URL
    /// or a zero request timeout.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::Config("API version must not be empty".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::Config("request_timeout must be greater than zero".to_string()));
        }
        url::Url::parse(&self.api_base_url)
            .map_err(|e| Error::Config(format!("Invalid api_base_url: {e}")))?;
        Ok(())
    }

    /// Versioned API root, e.g. `https://discord.com/api/v10`
    #[must_use]
    pub fn versioned_base(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.version.trim_matches('/')
        )
    }

    /// Set the default client ID
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the default client secret
    #[must_use]
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set a precomputed base64 Basic credential
    #[must_use]
    pub fn with_credentials(mut self, credentials: impl Into<String>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }

    /// Set the default redirect URI
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Override the unversioned API base URL
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }
}

/// Deserialize an ID that may arrive as a string or as a bare number
/// (`DISCORD_OAUTH_CLIENT_ID=1234` is read as an integer)
fn deserialize_snowflake<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(|id| match id {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}

/// Serialize a [`Duration`] as integer milliseconds
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
