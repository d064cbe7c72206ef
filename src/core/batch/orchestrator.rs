//! Batch orchestrator
//!
//! Validates the request, resolves the delivery band and acquires one
//! runner. It then logs in once, runs a pipeline per address and releases
//! the runner. Only request, login and runner-acquisition failures reject
//! the batch as a whole.

use super::executor::{ExecutorConfig, OrderedExecutor};
use crate::config::CheckoutConfig;
use crate::core::band;
use crate::core::checkout::{CheckoutPipeline, PipelineSettings};
use crate::core::runner::{CheckoutRunner, RunnerFactory};
use crate::core::session::SessionManager;
use crate::core::types::{AddressOutcome, BatchRequest, BatchResult, CheckoutTemplate};
use crate::utils::Sanitization;
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

pub struct BatchOrchestrator {
    config: CheckoutConfig,
    settings: PipelineSettings,
}

impl BatchOrchestrator {
    pub fn new(config: CheckoutConfig) -> Self {
        let settings = PipelineSettings::from(&config);
        Self { config, settings }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Run a whole batch with a runner obtained from `runners`
    pub async fn execute_batch(
        &self,
        request: &BatchRequest,
        runners: &dyn RunnerFactory,
    ) -> Result<BatchResult> {
        let batch_id = Uuid::new_v4();
        let span = info_span!("batch", %batch_id);

        async {
            request.validate()?;
            let delivery = band::resolve(&request.delivery.band, &request.delivery.date)?;
            debug!(band = %delivery.band, band_code = delivery.band_code, "delivery resolved");

            let runner = runners.create().map_err(GatewayError::Runner)?;
            let result = self.run(request, CheckoutTemplate::new(request, delivery), &runner).await;

            if let Err(e) = runner.dispose().await {
                warn!(runner = runner.name(), error = %e, "failed to dispose runner");
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        request: &BatchRequest,
        template: CheckoutTemplate,
        runner: &Arc<dyn CheckoutRunner>,
    ) -> Result<BatchResult> {
        runner.init().await.map_err(GatewayError::Runner)?;

        let sessions = SessionManager::new(runner.clone());
        let session = sessions.login(&request.credentials).await?;

        let addresses = &request.delivery.addresses;
        info!(
            usuario = %Sanitization::mask_identity(session.username()),
            direcciones = ?addresses,
            pedido = %request.cart.order_number,
            "purchase started"
        );

        let options = request.options();
        let concurrency = self.concurrency_for(runner.as_ref(), options.concurrency);
        let executor = OrderedExecutor::new(
            ExecutorConfig::new()
                .with_concurrency(concurrency)
                .with_deadline(self.config.batch_deadline()),
        );

        let pipeline = CheckoutPipeline::new(
            runner.as_ref(),
            &session,
            &template,
            &options,
            &self.settings,
        );
        let pipeline = &pipeline;

        let executed = executor
            .execute(addresses.iter().copied(), move |address_id| {
                pipeline.run(address_id)
            })
            .await;

        let outcomes: Vec<AddressOutcome> = executed
            .into_iter()
            .zip(addresses.iter().copied())
            .map(|(item, address_id)| match item.result {
                Some(outcome) => {
                    debug!(
                        address_id,
                        duration_ms = item.duration.as_millis() as u64,
                        success = outcome.is_success(),
                        "address finished"
                    );
                    outcome
                }
                None => {
                    warn!(address_id, "batch deadline passed before the address started");
                    AddressOutcome::not_started(address_id)
                }
            })
            .collect();

        let result = BatchResult::from_outcomes(outcomes);
        info!(
            success = result.success,
            failed = result.failed,
            orders = ?result.orders,
            session_age_ms = (Utc::now() - session.established_at()).num_milliseconds(),
            "purchase finished"
        );
        Ok(result)
    }

    fn concurrency_for(&self, runner: &dyn CheckoutRunner, requested: Option<usize>) -> usize {
        let concurrency = self.config.effective_concurrency(requested);
        if concurrency > 1 && !runner.supports_concurrent_checkouts() {
            debug!(
                runner = runner.name(),
                requested = concurrency,
                "runner cannot share a session across checkouts, running sequentially"
            );
            return 1;
        }
        concurrency
    }
}
