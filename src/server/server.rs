//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::core::runner::{HttpRunnerFactory, RunnerFactory};
use crate::server::handlers::{health_check, json_error_handler};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Server that reaches the platform over HTTP
    pub fn new(config: &Config) -> Result<Self> {
        let factory = HttpRunnerFactory::new(config.platform().clone());
        Ok(Self::with_factory(config, Arc::new(factory)))
    }

    /// Server with a caller-supplied runner factory
    pub fn with_factory(config: &Config, runners: Arc<dyn RunnerFactory>) -> Self {
        info!("Creating HTTP server");
        if config.server().dev_mode {
            warn!("Development mode enabled, /login-test is exposed");
        }

        Self {
            config: config.server().clone(),
            state: AppState::new(config.clone(), runners),
        }
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || create_app(state.clone()))
            .workers(self.config.worker_count())
            .client_request_timeout(Duration::from_secs(self.config.timeout))
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    fn format_bind_error(err: std::io::Error, bind_addr: &str, port: u16) -> GatewayError {
        if err.kind() == std::io::ErrorKind::AddrInUse {
            GatewayError::server(format!(
                "Port {} is already in use; set GATEWAY_PORT or server.port to another value",
                port
            ))
        } else {
            GatewayError::server(format!("Failed to bind {}: {}", bind_addr, err))
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Create the Actix-web application
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let server_config = state.config.server().clone();

    let json_config = web::JsonConfig::default()
        .limit(server_config.max_body_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(state)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .wrap(DefaultHeaders::new().add(("Server", "checkout-gateway")))
        .route("/health", web::get().to(health_check))
        .configure(routes::purchase::configure_routes)
        .configure(|cfg| {
            if server_config.dev_mode {
                routes::diagnostics::configure_routes(cfg);
            }
        })
}
