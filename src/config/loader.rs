//! Environment overrides
//!
//! Every setting that differs between deployments can be overridden from
//! the environment. The lookup is injected so tests can supply variables
//! without touching the process environment.

use super::models::*;
use crate::utils::error::{GatewayError, Result};
use std::str::FromStr;
use tracing::debug;

impl GatewayConfig {
    /// Apply overrides returned by `lookup` on top of the current values
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Applying environment overrides");

        // Server configuration
        if let Some(host) = lookup("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            self.server.port = parse_var("GATEWAY_PORT", &port)?;
        }
        if let Some(workers) = lookup("GATEWAY_WORKERS") {
            self.server.workers = Some(parse_var("GATEWAY_WORKERS", &workers)?);
        }

        // Platform configuration
        if let Some(base_url) = lookup("PLATFORM_BASE_URL") {
            self.platform.base_url = base_url;
        }
        if let Some(timeout) = lookup("PLATFORM_TIMEOUT") {
            self.platform.timeout = parse_var("PLATFORM_TIMEOUT", &timeout)?;
        }
        match (lookup("PROBE_USERNAME"), lookup("PROBE_PASSWORD")) {
            (Some(username), Some(password)) => {
                self.platform.probe = Some(ProbeCredentials { username, password });
            }
            (None, None) => {}
            _ => {
                return Err(GatewayError::Config(
                    "PROBE_USERNAME and PROBE_PASSWORD must be set together".to_string(),
                ));
            }
        }

        // Checkout configuration
        if let Some(max) = lookup("CHECKOUT_MAX_CONCURRENCY") {
            self.checkout.max_concurrency = parse_var("CHECKOUT_MAX_CONCURRENCY", &max)?;
        }
        if let Some(deadline) = lookup("CHECKOUT_BATCH_DEADLINE") {
            self.checkout.batch_deadline = Some(parse_var("CHECKOUT_BATCH_DEADLINE", &deadline)?);
        }
        if let Some(timeout) = lookup("CHECKOUT_STEP_TIMEOUT") {
            self.checkout.step_timeout = parse_var("CHECKOUT_STEP_TIMEOUT", &timeout)?;
        }

        // Logging configuration
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("LOG_JSON") {
            self.logging.json = parse_var("LOG_JSON", &json)?;
        }

        Ok(())
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", name, e)))
}
