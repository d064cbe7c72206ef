//! Checkout stage machine

use crate::core::types::CheckoutStep;
use serde::Serialize;

/// Where a pipeline attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutStage {
    Start,
    CartCleared,
    AddressSelected,
    OrderReplicated,
    Validated,
    StockRemediated,
    CheckoutRefreshed,
    Committed,
}

impl CheckoutStage {
    /// Stage reached by running `step` from `self`, `None` when the step is
    /// not allowed here.
    ///
    /// Fetching payment plans leaves the stage unchanged. Refreshing is also
    /// allowed after a commit so a rejected commit can be retried.
    pub fn transition(self, step: CheckoutStep) -> Option<CheckoutStage> {
        use CheckoutStage::*;

        match (self, step) {
            (Start, CheckoutStep::ClearCart) => Some(CartCleared),
            (CartCleared, CheckoutStep::SelectAddress) => Some(AddressSelected),
            (AddressSelected, CheckoutStep::RepeatOrder) => Some(OrderReplicated),
            (OrderReplicated, CheckoutStep::ValidateCart) => Some(Validated),
            (Validated, CheckoutStep::RemoveOutOfStock) => Some(StockRemediated),
            (Validated | StockRemediated | CheckoutRefreshed, CheckoutStep::FetchPaymentPlans) => {
                Some(self)
            }
            (Validated | StockRemediated | Committed, CheckoutStep::RefreshCheckout) => {
                Some(CheckoutRefreshed)
            }
            (CheckoutRefreshed, CheckoutStep::CommitOrder) => Some(Committed),
            _ => None,
        }
    }
}
