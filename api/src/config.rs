//! API configuration assembled from the environment

mod error_config;

pub use error_config::ErrorConfig;

use sid_shared::{AppConfig, ConfigError};

/// Everything the API binary reads at start-up
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub app: AppConfig,
    pub error: ErrorConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            app: AppConfig::from_env()?,
            error: ErrorConfig::from_env()?,
        })
    }

    pub fn is_development(&self) -> bool {
        self.app.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.app.environment.is_production()
    }

    pub fn bind_address(&self) -> String {
        self.app.server.bind_address()
    }
}
