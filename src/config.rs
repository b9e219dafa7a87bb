//! API credential configuration
//!
//! MapQuest issues a consumer key and secret pair. Only the key is ever
//! transmitted, as the `key` query parameter on radius searches; the secret
//! is loaded alongside it but the radius endpoint does not use it. Values
//! come from the environment, with an optional `.env` file read in main
//! before this module runs.

use thiserror::Error;

/// Environment variable holding the MapQuest consumer key
pub const API_KEY_VAR: &str = "MAPQUEST_API_KEY";

/// Environment variable holding the MapQuest consumer secret
pub const API_SECRET_VAR: &str = "MAPQUEST_API_SECRET";

/// Error types for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The key variable is unset or empty
    #[error("Missing API credential: set MAPQUEST_API_KEY (optionally via a .env file)")]
    MissingApiKey,
}

/// Credentials loaded once at process start
#[derive(Debug, Clone)]
pub struct Config {
    /// Consumer key, sent as the `key` query parameter
    pub api_key: String,
    /// Consumer secret; kept local, never transmitted
    pub api_secret: Option<String>,
}

impl Config {
    /// Reads credentials from the environment.
    ///
    /// # Returns
    /// * `Ok(Config)` when the key variable is set and non-empty
    /// * `Err(ConfigError::MissingApiKey)` otherwise
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let api_secret = std::env::var(API_SECRET_VAR)
            .ok()
            .filter(|secret| !secret.trim().is_empty());
        Ok(Self { api_key, api_secret })
    }
}
