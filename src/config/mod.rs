
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use url::Url;

/// Environment variable holding the Supabase project endpoint URL.
pub const URL_ENV_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the public anonymous key.
pub const ANON_KEY_ENV_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub url: Url,
    pub anon_key: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Invalid protocol: {0} (must be 'http' or 'https')")]
    InvalidProtocol(String),
    #[error("Invalid anon key (cannot be empty)")]
    EmptyAnonKey,
}

impl Config {
    #[inline]
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;

        let config = Self {
            url,
            anon_key: anon_key.to_string(),
        };
        config.validate()?;

        Ok(config)
    }

    /// Read configuration from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// Both variables are required. A variable that is unset or blank is a
    /// fatal configuration error since the client cannot reach the service
    /// without it.
    #[inline]
    pub fn from_env() -> Result<Self> {
        let url = required_var(URL_ENV_VAR)?;
        let anon_key = required_var(ANON_KEY_ENV_VAR)?;

        Self::new(&url, &anon_key).context("Environment configuration is invalid")
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.scheme() != "http" && self.url.scheme() != "https" {
            return Err(ConfigError::InvalidProtocol(self.url.scheme().to_owned()));
        }

        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::EmptyAnonKey);
        }

        Ok(())
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVar(name))
}
