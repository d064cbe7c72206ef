//! Per-address checkout state
//!
//! Every value the commit call needs travels in a [`CheckoutContext`] that
//! one pipeline attempt owns exclusively. Nothing is read from process-wide
//! state, so concurrent addresses cannot observe each other's parameters.

use super::outcome::PaymentPlans;
use super::request::{AddressId, BatchRequest};
use crate::core::band::ResolvedDelivery;
use crate::core::checkout::CheckoutStage;

/// Batch-wide values copied into each fresh context
#[derive(Debug, Clone)]
pub struct CheckoutTemplate {
    pub order_number: String,
    pub order_id: String,
    pub payment_method_id: u32,
    pub card_bank_id: String,
    pub delivery: ResolvedDelivery,
}

impl CheckoutTemplate {
    pub fn new(request: &BatchRequest, delivery: ResolvedDelivery) -> Self {
        Self {
            order_number: request.cart.order_number.clone(),
            order_id: request.cart.order_id.clone(),
            payment_method_id: request.payment.payment_method_id,
            card_bank_id: request.payment.card_bank_id.clone(),
            delivery,
        }
    }
}

/// Mutable state of one pipeline attempt for one address.
///
/// Not `Clone`: a context is created, threaded through the steps of a single
/// attempt and dropped. Retries build a new one.
#[derive(Debug)]
pub struct CheckoutContext {
    address_id: AddressId,
    attempt: u32,
    billing_date: String,
    delivery_date: String,
    band_code: String,
    payment_method_id: u32,
    card_bank_id: String,
    plans: Option<PaymentPlans>,
    stage: CheckoutStage,
}

impl CheckoutContext {
    pub fn new(address_id: AddressId, attempt: u32, template: &CheckoutTemplate) -> Self {
        Self {
            address_id,
            attempt,
            billing_date: template.delivery.date.clone(),
            delivery_date: template.delivery.date.clone(),
            band_code: template.delivery.band_code.to_string(),
            payment_method_id: template.payment_method_id,
            card_bank_id: template.card_bank_id.clone(),
            plans: None,
            stage: CheckoutStage::Start,
        }
    }

    pub fn address_id(&self) -> AddressId {
        self.address_id
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Charge date, `YYYYMMDD`
    pub fn billing_date(&self) -> &str {
        &self.billing_date
    }

    /// Delivery date, `YYYYMMDD`
    pub fn delivery_date(&self) -> &str {
        &self.delivery_date
    }

    pub fn band_code(&self) -> &str {
        &self.band_code
    }

    pub fn payment_method_id(&self) -> u32 {
        self.payment_method_id
    }

    pub fn card_bank_id(&self) -> &str {
        &self.card_bank_id
    }

    pub fn plans(&self) -> Option<&PaymentPlans> {
        self.plans.as_ref()
    }

    pub fn set_plans(&mut self, plans: PaymentPlans) {
        self.plans = Some(plans);
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub(crate) fn enter(&mut self, stage: CheckoutStage) {
        self.stage = stage;
    }
}
