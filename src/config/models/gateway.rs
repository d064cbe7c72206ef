//! Top-level gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Commerce platform connection
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Batch execution policy
    #[serde(default)]
    pub checkout: CheckoutConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}
