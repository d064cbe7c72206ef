//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::BatchOrchestrator;
use crate::core::runner::RunnerFactory;
use std::sync::Arc;

/// HTTP server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Batch orchestrator configured from `checkout`
    pub orchestrator: Arc<BatchOrchestrator>,
    /// Source of one runner per batch
    pub runners: Arc<dyn RunnerFactory>,
}

impl AppState {
    pub fn new(config: Config, runners: Arc<dyn RunnerFactory>) -> Self {
        let orchestrator = BatchOrchestrator::new(config.checkout().clone());
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            runners,
        }
    }
}
