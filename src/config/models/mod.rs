//! Configuration data models

#![allow(missing_docs)]

pub mod checkout;
pub mod gateway;
pub mod logging;
pub mod platform;
pub mod server;

pub use checkout::*;
pub use gateway::*;
pub use logging::*;
pub use platform::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3000
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

pub fn default_base_url() -> String {
    "https://testdigital3.redcoto.com.ar".to_string()
}

pub fn default_push_site() -> String {
    "CotoDigital".to_string()
}

/// Pause after the checkout refresh, in milliseconds
pub fn default_settle_delay_ms() -> u64 {
    1600
}

pub fn default_max_concurrency() -> usize {
    4
}

pub fn default_concurrency() -> usize {
    1
}

/// Per-step timeout in seconds
pub fn default_step_timeout() -> u64 {
    60
}

pub fn default_retry_backoff_ms() -> u64 {
    500
}

/// Upper bound on `maxReintentos` accepted from a request
pub fn default_max_retries_cap() -> u32 {
    3
}

pub fn default_log_level() -> String {
    "info".to_string()
}
