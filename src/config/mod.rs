//! Configuration management for the Gateway
//!
//! Configuration comes from an optional YAML file, then environment
//! overrides, then validation.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the Gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let gateway: GatewayConfig = serde_yaml::from_str(&content)?;

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// File if it exists, defaults otherwise, environment on top
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut gateway = if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::from_file(path).await?.gateway
        } else {
            info!("Config file {:?} not found, using defaults", path);
            GatewayConfig::default()
        };

        gateway.apply_env(|key| std::env::var(key).ok())?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get platform configuration
    pub fn platform(&self) -> &PlatformConfig {
        &self.gateway.platform
    }

    /// Get checkout policy
    pub fn checkout(&self) -> &CheckoutConfig {
        &self.gateway.checkout
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .validate()
            .map_err(|e| GatewayError::Config(format!("Invalid configuration: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}
