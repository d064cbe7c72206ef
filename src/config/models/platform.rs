//! Commerce platform connection settings

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where and how the HTTP runner reaches the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Scheme and host of the platform, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value of the `pushSite` parameter sent on every call
    #[serde(default = "default_push_site")]
    pub push_site: String,
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Skip TLS certificate verification (test hosts only)
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Pause after refreshing checkout, in milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default)]
    pub shipping: ShippingConfig,
    #[serde(default)]
    pub commit: CommitConfig,
    /// Account used by the development login check
    #[serde(default)]
    pub probe: Option<ProbeCredentials>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            push_site: default_push_site(),
            timeout: default_timeout(),
            accept_invalid_certs: false,
            settle_delay_ms: default_settle_delay_ms(),
            shipping: ShippingConfig::default(),
            commit: CommitConfig::default(),
            probe: None,
        }
    }
}

impl PlatformConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Constants of the shipping-cost request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// `costoEnvio`
    pub cost: String,
    /// `idServicioDisponible`
    pub service_id: String,
    /// `idTipoGrupo`
    pub group_type: String,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            cost: "399".to_string(),
            service_id: "300".to_string(),
            group_type: "1".to_string(),
        }
    }
}

/// Constants of the commit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitConfig {
    pub pin: String,
    /// `idTiposPago`
    pub payment_types: String,
    /// `idTiposServicioEntrega`
    pub delivery_service_types: String,
    /// `cobroOnline`
    pub online_charge: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            pin: "111".to_string(),
            payment_types: "1_2".to_string(),
            delivery_service_types: "1_300".to_string(),
            online_charge: "2".to_string(),
        }
    }
}

/// Credentials for `/login-test`
#[derive(Clone, Serialize, Deserialize)]
pub struct ProbeCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ProbeCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
