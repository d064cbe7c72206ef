//! Runner capability
//!
//! A runner issues the primitive platform operations a checkout is built
//! from. The pipeline only sequences these calls; how each one reaches the
//! platform is the runner's business.

pub mod error;
pub mod http;

pub use error::{RunnerError, RunnerResult};
pub use http::{HttpRunner, HttpRunnerFactory};

use crate::core::types::{
    AddressId, CartValidation, CheckoutContext, CommitOutcome, Credentials, PaymentPlans,
    SessionHandle,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Primitive operations against the commerce platform
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutRunner: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Whether several pipelines may drive this runner at the same time
    /// against one session. The cart lives server-side per session, so the
    /// default is no.
    fn supports_concurrent_checkouts(&self) -> bool {
        false
    }

    /// Acquire transport resources
    async fn init(&self) -> RunnerResult<()>;

    /// Release transport resources
    async fn dispose(&self) -> RunnerResult<()>;

    /// Authenticate; afterwards [`CheckoutRunner::session_token`] is available
    async fn login(&self, credentials: &Credentials) -> RunnerResult<()>;

    /// Session confirmation number obtained at login
    fn session_token(&self) -> Option<String>;

    async fn clear_cart(&self, session: &SessionHandle) -> RunnerResult<()>;

    async fn select_address(
        &self,
        session: &SessionHandle,
        address_id: AddressId,
    ) -> RunnerResult<()>;

    async fn repeat_order(
        &self,
        session: &SessionHandle,
        order_number: &str,
        order_id: &str,
    ) -> RunnerResult<()>;

    async fn validate_cart(&self, session: &SessionHandle) -> RunnerResult<CartValidation>;

    async fn remove_out_of_stock(&self, session: &SessionHandle) -> RunnerResult<()>;

    async fn payment_plans(
        &self,
        session: &SessionHandle,
        ctx: &CheckoutContext,
    ) -> RunnerResult<PaymentPlans>;

    /// Re-synchronize cart totals, payment plans and shipping cost
    async fn refresh_checkout(
        &self,
        session: &SessionHandle,
        ctx: &CheckoutContext,
    ) -> RunnerResult<()>;

    async fn commit_order(
        &self,
        session: &SessionHandle,
        ctx: &CheckoutContext,
    ) -> RunnerResult<CommitOutcome>;
}

/// Creates one runner per batch
#[cfg_attr(test, mockall::automock)]
pub trait RunnerFactory: Send + Sync {
    fn create(&self) -> RunnerResult<Arc<dyn CheckoutRunner>>;
}
