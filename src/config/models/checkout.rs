//! Batch execution policy

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// When payment plans are fetched relative to the checkout refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanFetchPolicy {
    /// Fetch plans, then refresh
    #[default]
    BeforeRefresh,
    /// Refresh, then fetch plans so they match the refreshed cart
    AfterRefresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Pipelines in flight when a request does not ask for a value
    #[serde(default = "default_concurrency")]
    pub default_concurrency: usize,
    /// Hard bound on pipelines in flight
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Seconds after which no new address is started
    #[serde(default)]
    pub batch_deadline: Option<u64>,
    /// Seconds one step may take
    #[serde(default = "default_step_timeout")]
    pub step_timeout: u64,
    /// Pause between attempts for the same address, in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Largest `maxReintentos` honored
    #[serde(default = "default_max_retries_cap")]
    pub max_retries_cap: u32,
    #[serde(default)]
    pub plan_fetch: PlanFetchPolicy,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            default_concurrency: default_concurrency(),
            max_concurrency: default_max_concurrency(),
            batch_deadline: None,
            step_timeout: default_step_timeout(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_retries_cap: default_max_retries_cap(),
            plan_fetch: PlanFetchPolicy::default(),
        }
    }
}

impl CheckoutConfig {
    pub fn step_timeout(&self) -> Duration {
        Duration::from_secs(self.step_timeout)
    }

    pub fn batch_deadline(&self) -> Option<Duration> {
        self.batch_deadline.map(Duration::from_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Pipelines in flight for a batch.
    ///
    /// `requested` falls back to the default, then is clamped to
    /// `1..=max_concurrency`.
    pub fn effective_concurrency(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_concurrency)
            .clamp(1, self.max_concurrency.max(1))
    }
}
