//! Configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Upper bound on retries configured per address
const MAX_RETRIES_CAP: u32 = 20;

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        self.server.validate()?;
        self.platform.validate()?;
        self.checkout.validate()?;
        self.logging.validate()?;

        if self.server.dev_mode && self.platform.probe.is_none() {
            warn!("dev_mode is enabled but no probe credentials are configured");
        }

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.timeout == 0 {
            return Err("Timeout cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for PlatformConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Platform base_url is invalid: {}", e))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "Platform base_url must use http:// or https://, got: {}",
                    scheme
                ));
            }
        }

        if url.host_str().is_none() {
            return Err("Platform base_url must include a host".to_string());
        }

        if self.push_site.trim().is_empty() {
            return Err("Platform push_site cannot be empty".to_string());
        }

        if self.timeout == 0 {
            return Err("Platform timeout cannot be 0".to_string());
        }

        if self.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for the platform client");
        }

        if let Some(probe) = &self.probe {
            if probe.username.is_empty() || probe.password.is_empty() {
                return Err("Probe credentials need both username and password".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for CheckoutConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }

        if self.default_concurrency == 0 {
            return Err("default_concurrency must be greater than 0".to_string());
        }

        if self.default_concurrency > self.max_concurrency {
            return Err(format!(
                "default_concurrency ({}) exceeds max_concurrency ({})",
                self.default_concurrency, self.max_concurrency
            ));
        }

        if self.step_timeout == 0 {
            return Err("step_timeout must be greater than 0".to_string());
        }

        if self.max_retries_cap > MAX_RETRIES_CAP {
            return Err(format!(
                "max_retries_cap ({}) exceeds {}",
                self.max_retries_cap, MAX_RETRIES_CAP
            ));
        }

        if self.batch_deadline == Some(0) {
            return Err("batch_deadline must be greater than 0 when set".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))
    }
}
