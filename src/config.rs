//! Runtime configuration read from environment variables at startup.

use std::env;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("{0} must be an http(s) URL, got {1:?}")]
    InvalidEndpoint(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Remote script endpoint that stores the survey records.
    pub endpoint_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint_url = lookup("RELAX_ENDPOINT_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing("RELAX_ENDPOINT_URL"))?;
        if !endpoint_url.starts_with("http://") && !endpoint_url.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint(
                "RELAX_ENDPOINT_URL",
                endpoint_url,
            ));
        }

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self { endpoint_url, port })
    }
}
