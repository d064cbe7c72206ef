//! Named steps of the checkout pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// One platform operation performed while checking out an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutStep {
    ClearCart,
    SelectAddress,
    RepeatOrder,
    ValidateCart,
    RemoveOutOfStock,
    FetchPaymentPlans,
    RefreshCheckout,
    CommitOrder,
}

impl CheckoutStep {
    /// Platform operation name, used in logs and error messages
    pub fn operation(&self) -> &'static str {
        match self {
            CheckoutStep::ClearCart => "clearCart",
            CheckoutStep::SelectAddress => "selectAddress",
            CheckoutStep::RepeatOrder => "repeatOrder",
            CheckoutStep::ValidateCart => "validateCart",
            CheckoutStep::RemoveOutOfStock => "removeOutOfStock",
            CheckoutStep::FetchPaymentPlans => "getPaymentPlans",
            CheckoutStep::RefreshCheckout => "refreshCheckout",
            CheckoutStep::CommitOrder => "commitOrder",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}
