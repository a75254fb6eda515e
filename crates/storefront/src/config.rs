//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

const ENV_DATA_DIR: &str = "CLEMENTINE_DATA_DIR";
const ENV_PAGE_SIZE: &str = "CLEMENTINE_PAGE_SIZE";
const ENV_MOCK_LATENCY_MS: &str = "CLEMENTINE_MOCK_LATENCY_MS";

const DEFAULT_DATA_DIR: &str = ".clementine";
const DEFAULT_PAGE_SIZE: usize = 16;
const DEFAULT_MOCK_LATENCY_MS: u64 = 400;

/// Configuration load failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Runtime settings, read from the environment with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding persisted state (cart, saved items, session).
    pub data_dir: PathBuf,
    /// Listings per catalog page.
    pub page_size: usize,
    /// Simulated latency for mocked backend calls, in milliseconds.
    pub mock_latency_ms: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            mock_latency_ms: DEFAULT_MOCK_LATENCY_MS,
        }
    }
}

impl StorefrontConfig {
    /// Load from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when a set variable fails to
    /// parse. Unset variables use defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup(ENV_DATA_DIR)
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let page_size = match lookup(ENV_PAGE_SIZE) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidEnvVar(ENV_PAGE_SIZE, raw))?,
            None => DEFAULT_PAGE_SIZE,
        };

        let mock_latency_ms = match lookup(ENV_MOCK_LATENCY_MS) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnvVar(ENV_MOCK_LATENCY_MS, raw))?,
            None => DEFAULT_MOCK_LATENCY_MS,
        };

        let config = Self {
            data_dir,
            page_size,
            mock_latency_ms,
        };
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// The simulated latency as a [`Duration`].
    #[must_use]
    pub const fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}
