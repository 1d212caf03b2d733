//! Startup configuration
//!
//! Everything the relay needs is read once from the process environment and
//! carried in a [`Config`] value that is handed to the service explicitly.

use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Fixed parameters of every upstream completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl UpstreamSettings {
    #[must_use]
    pub fn with_base_url(
        mut self,
        base_url: impl Into<String>,
    ) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Endpoint receiving the completion POST.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Upstream credential. A missing key is not an error here; the upstream
    /// rejects the call and the failure reaches the client as a 500.
    pub api_key: Option<String>,
    pub upstream: UpstreamSettings,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            upstream: UpstreamSettings::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
}

impl fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(value) => write!(f, "PORT must be a number between 0 and 65535, got {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Recognised variables: `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `HOST`, `PORT`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is present but is not a valid port number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut upstream = UpstreamSettings::default();
        if let Some(base_url) = non_empty("OPENAI_BASE_URL") {
            upstream = upstream.with_base_url(base_url);
        }

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key: non_empty("OPENAI_API_KEY"),
            upstream,
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }
}
