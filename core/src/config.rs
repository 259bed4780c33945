//! Client configuration.
//!
//! The base URL is a deployment-time setting read from `CARD_API_URL`. An
//! unset or blank variable falls back to `DEFAULT_BASE_URL`.

use crate::client::CardClient;
use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const BASE_URL_ENV: &str = "CARD_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            Some(url) => Self::new(&url),
            None => Ok(Self::default()),
        }
    }

    pub fn client(&self) -> CardClient {
        CardClient::new(&self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
