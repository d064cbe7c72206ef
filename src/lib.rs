//! # checkout-gateway
//!
//! HTTP gateway that repeats a known order against a retail commerce
//! platform once per delivery address, inside a single authenticated
//! session.
//!
//! ## Features
//!
//! - **Batch checkout**: one request, many delivery addresses, one login
//! - **Isolated failures**: an address that fails never aborts the others
//! - **Bounded concurrency**: optional, capped by what the runner supports
//! - **Pluggable runner**: the platform adapter sits behind a trait
//!
//! ## Library use
//!
//! ```rust,no_run
//! use checkout_gateway::{BatchOrchestrator, BatchRequest, Config, HttpRunnerFactory};
//!
//! # async fn run(request: BatchRequest) -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load("config/gateway.yaml").await?;
//! let orchestrator = BatchOrchestrator::new(config.checkout().clone());
//! let runners = HttpRunnerFactory::new(config.platform().clone());
//!
//! let result = orchestrator.execute_batch(&request, &runners).await?;
//! println!("{} committed, {} failed", result.success, result.failed);
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::BatchOrchestrator;
pub use core::runner::{
    CheckoutRunner, HttpRunner, HttpRunnerFactory, RunnerError, RunnerFactory, RunnerResult,
};
pub use core::types::{AddressOutcome, BatchRequest, BatchResult, SessionHandle};
pub use utils::error::{GatewayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Seconds since the epoch at build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
