// ABOUTME: Environment configuration for the Crewboard CLI
// ABOUTME: Centralized env var names plus Config::from_env

use std::env;
use thiserror::Error;

// Backend connection
pub const CREWBOARD_BACKEND_URL: &str = "CREWBOARD_BACKEND_URL";
pub const CREWBOARD_API_KEY: &str = "CREWBOARD_API_KEY";
pub const CREWBOARD_SERVICE_TOKEN: &str = "CREWBOARD_SERVICE_TOKEN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub api_key: String,
    pub service_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = env::var(CREWBOARD_BACKEND_URL)
            .map_err(|_| ConfigError::Missing(CREWBOARD_BACKEND_URL))?;
        let api_key =
            env::var(CREWBOARD_API_KEY).map_err(|_| ConfigError::Missing(CREWBOARD_API_KEY))?;
        let service_token = env::var(CREWBOARD_SERVICE_TOKEN).ok();

        Ok(Config {
            backend_url,
            api_key,
            service_token,
        })
    }
}
