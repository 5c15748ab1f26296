use std::env;
use std::time::Duration;

/// Address the server listens on. Not configurable.
pub const SERVER_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub conn_url: String,
    pub max_pool_size: u32,
    pub store_timeout: Duration,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// A local `.env` file is loaded first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let conn_url = lookup("CONN_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingConnUrl)?;

        let max_pool_size = match lookup("MAX_POOL_SIZE") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidPoolSize(raw))?,
            None => 5,
        };

        let store_timeout_secs = match lookup("STORE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidStoreTimeout(raw))?,
            None => 5,
        };

        Ok(Self {
            conn_url,
            max_pool_size,
            store_timeout: Duration::from_secs(store_timeout_secs),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CONN_URL must be set")]
    MissingConnUrl,
    #[error("MAX_POOL_SIZE must be a positive number, got {0:?}")]
    InvalidPoolSize(String),
    #[error("STORE_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidStoreTimeout(String),
}
