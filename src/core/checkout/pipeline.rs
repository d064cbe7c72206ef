//! Per-address checkout pipeline
//!
//! Drives a runner through the fixed step order for one address. Every
//! failure stops at this boundary and comes back as an [`AddressOutcome`].

use super::stage::CheckoutStage;
use crate::config::{CheckoutConfig, PlanFetchPolicy};
use crate::core::runner::{CheckoutRunner, RunnerError, RunnerResult};
use crate::core::types::{
    AddressId, AddressOutcome, CartValidation, CheckoutContext, CheckoutStep, CheckoutTemplate,
    CommitFailureReason, CommitOutcome, FailureReason, PurchaseOptions, SessionHandle,
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A step that failed, with the runner error behind it
#[derive(Debug, thiserror::Error)]
#[error("{step} failed: {source}")]
pub struct StepError {
    pub step: CheckoutStep,
    #[source]
    pub source: RunnerError,
}

impl StepError {
    pub fn new(step: CheckoutStep, source: RunnerError) -> Self {
        Self { step, source }
    }
}

/// Execution knobs shared by every pipeline of a batch
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub step_timeout: Duration,
    pub retry_backoff: Duration,
    pub max_retries_cap: u32,
    pub plan_fetch: PlanFetchPolicy,
}

impl From<&CheckoutConfig> for PipelineSettings {
    fn from(config: &CheckoutConfig) -> Self {
        Self {
            step_timeout: config.step_timeout(),
            retry_backoff: config.retry_backoff(),
            max_retries_cap: config.max_retries_cap,
            plan_fetch: config.plan_fetch,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&CheckoutConfig::default())
    }
}

pub struct CheckoutPipeline<'a> {
    runner: &'a dyn CheckoutRunner,
    session: &'a SessionHandle,
    template: &'a CheckoutTemplate,
    options: &'a PurchaseOptions,
    settings: &'a PipelineSettings,
}

impl<'a> CheckoutPipeline<'a> {
    pub fn new(
        runner: &'a dyn CheckoutRunner,
        session: &'a SessionHandle,
        template: &'a CheckoutTemplate,
        options: &'a PurchaseOptions,
        settings: &'a PipelineSettings,
    ) -> Self {
        Self {
            runner,
            session,
            template,
            options,
            settings,
        }
    }

    /// Attempts allowed for one address
    pub fn max_attempts(&self) -> u32 {
        self.options
            .max_retries
            .min(self.settings.max_retries_cap)
            .saturating_add(1)
    }

    /// Check out one address, retrying with a fresh context when allowed
    pub async fn run(&self, address_id: AddressId) -> AddressOutcome {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;

        loop {
            info!(address_id, attempt, "processing address");

            let mut ctx = CheckoutContext::new(address_id, attempt, self.template);
            let result = self.attempt(&mut ctx).await;

            let retryable = match &result {
                Ok(CommitOutcome::Success { order_id }) => {
                    info!(address_id, attempt, order_id = %order_id, "order committed");
                    return AddressOutcome::success(address_id, order_id.clone(), attempt);
                }
                Ok(CommitOutcome::Failure { reason }) => {
                    warn!(address_id, attempt, reason = ?reason, "commit rejected");
                    match reason {
                        CommitFailureReason::OutOfStock => self.options.retry_out_of_stock,
                        CommitFailureReason::GenericError => true,
                    }
                }
                Err(e) => {
                    warn!(address_id, attempt, step = %e.step, error = %e.source, "step failed");
                    // A commit lost in transport may still have created the order
                    e.step != CheckoutStep::CommitOrder && e.source.is_retryable()
                }
            };

            if !retryable || attempt >= max_attempts {
                return Self::failure_outcome(address_id, result, attempt);
            }

            debug!(address_id, attempt, "retrying address from the start");
            if !self.settings.retry_backoff.is_zero() {
                tokio::time::sleep(self.settings.retry_backoff).await;
            }
            attempt += 1;
        }
    }

    fn failure_outcome(
        address_id: AddressId,
        result: Result<CommitOutcome, StepError>,
        attempts: u32,
    ) -> AddressOutcome {
        match result {
            Ok(CommitOutcome::Success { order_id }) => {
                AddressOutcome::success(address_id, order_id, attempts)
            }
            Ok(CommitOutcome::Failure { reason }) => AddressOutcome::failure(
                address_id,
                reason.into(),
                Some(CheckoutStep::CommitOrder),
                None,
                attempts,
            ),
            Err(e) => AddressOutcome::failure(
                address_id,
                FailureReason::GenericError,
                Some(e.step),
                Some(e.source.to_string()),
                attempts,
            ),
        }
    }

    /// One pass through every step with `ctx`
    async fn attempt(&self, ctx: &mut CheckoutContext) -> Result<CommitOutcome, StepError> {
        let runner = self.runner;
        let session = self.session;

        let next = Self::advance(ctx, CheckoutStep::ClearCart)?;
        self.timed(CheckoutStep::ClearCart, runner.clear_cart(session))
            .await?;
        ctx.enter(next);

        let next = Self::advance(ctx, CheckoutStep::SelectAddress)?;
        self.timed(
            CheckoutStep::SelectAddress,
            runner.select_address(session, ctx.address_id()),
        )
        .await?;
        ctx.enter(next);

        let next = Self::advance(ctx, CheckoutStep::RepeatOrder)?;
        self.timed(
            CheckoutStep::RepeatOrder,
            runner.repeat_order(
                session,
                &self.template.order_number,
                &self.template.order_id,
            ),
        )
        .await?;
        ctx.enter(next);

        let next = Self::advance(ctx, CheckoutStep::ValidateCart)?;
        let validation = self
            .timed(CheckoutStep::ValidateCart, runner.validate_cart(session))
            .await?;
        ctx.enter(next);
        debug!(address_id = ctx.address_id(), validation = ?validation, "cart validated");

        if validation == CartValidation::OutOfStock {
            let next = Self::advance(ctx, CheckoutStep::RemoveOutOfStock)?;
            self.timed(
                CheckoutStep::RemoveOutOfStock,
                runner.remove_out_of_stock(session),
            )
            .await?;
            ctx.enter(next);
            info!(address_id = ctx.address_id(), "out-of-stock items removed");
        }

        match self.settings.plan_fetch {
            PlanFetchPolicy::BeforeRefresh => {
                self.fetch_plans(ctx).await?;
                self.refresh(ctx).await?;
            }
            PlanFetchPolicy::AfterRefresh => {
                self.refresh(ctx).await?;
                self.fetch_plans(ctx).await?;
            }
        }

        let outcome = self.commit(ctx).await?;

        if self.options.fallback_refresh
            && outcome == CommitOutcome::failure(CommitFailureReason::GenericError)
        {
            info!(address_id = ctx.address_id(), "refreshing checkout before a second commit");
            self.refresh(ctx).await?;
            if self.settings.plan_fetch == PlanFetchPolicy::AfterRefresh {
                self.fetch_plans(ctx).await?;
            }
            return self.commit(ctx).await;
        }

        Ok(outcome)
    }

    async fn fetch_plans(&self, ctx: &mut CheckoutContext) -> Result<(), StepError> {
        let next = Self::advance(ctx, CheckoutStep::FetchPaymentPlans)?;
        let plans = self
            .timed(
                CheckoutStep::FetchPaymentPlans,
                self.runner.payment_plans(self.session, ctx),
            )
            .await?;
        ctx.set_plans(plans);
        ctx.enter(next);
        Ok(())
    }

    async fn refresh(&self, ctx: &mut CheckoutContext) -> Result<(), StepError> {
        let next = Self::advance(ctx, CheckoutStep::RefreshCheckout)?;
        self.timed(
            CheckoutStep::RefreshCheckout,
            self.runner.refresh_checkout(self.session, ctx),
        )
        .await?;
        ctx.enter(next);
        Ok(())
    }

    async fn commit(&self, ctx: &mut CheckoutContext) -> Result<CommitOutcome, StepError> {
        let next = Self::advance(ctx, CheckoutStep::CommitOrder)?;
        if ctx.plans().is_none() {
            return Err(StepError::new(
                CheckoutStep::CommitOrder,
                RunnerError::invalid_state("commitOrder", "payment plans were not fetched"),
            ));
        }

        let outcome = self
            .timed(
                CheckoutStep::CommitOrder,
                self.runner.commit_order(self.session, ctx),
            )
            .await?;
        ctx.enter(next);
        Ok(outcome)
    }

    fn advance(ctx: &CheckoutContext, step: CheckoutStep) -> Result<CheckoutStage, StepError> {
        ctx.stage().transition(step).ok_or_else(|| {
            StepError::new(
                step,
                RunnerError::invalid_state(
                    step.operation(),
                    format!("not allowed in stage {:?}", ctx.stage()),
                ),
            )
        })
    }

    async fn timed<T, F>(&self, step: CheckoutStep, call: F) -> Result<T, StepError>
    where
        F: Future<Output = RunnerResult<T>>,
    {
        match tokio::time::timeout(self.settings.step_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(StepError::new(step, e)),
            Err(_) => Err(StepError::new(
                step,
                RunnerError::timeout(step.operation(), self.settings.step_timeout),
            )),
        }
    }
}
