//! Server builder and run_server function

use crate::config::Config;
use crate::core::runner::RunnerFactory;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use crate::utils::logging::init_tracing;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    runners: Option<Arc<dyn RunnerFactory>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `runners` instead of the HTTP runner
    pub fn with_runner_factory(mut self, runners: Arc<dyn RunnerFactory>) -> Self {
        self.runners = Some(runners);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        match self.runners {
            Some(runners) => Ok(HttpServer::with_factory(&config, runners)),
            None => HttpServer::new(&config),
        }
    }
}

/// Load configuration from `config_path`, install logging and serve
pub async fn run_server(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path).await?;
    init_tracing(config.logging())?;

    info!("Starting checkout gateway {}", crate::VERSION);
    info!(path = ?config_path, "configuration loaded");

    let server = ServerBuilder::new().with_config(config.clone()).build()?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /purchase - Batch checkout");
    if config.server().dev_mode {
        info!("   GET  /login-test - Platform login check");
    }

    server.start().await
}
