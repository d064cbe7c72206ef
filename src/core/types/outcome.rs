//! Typed platform results and per-address / per-batch outcomes

use super::request::AddressId;
use super::step::CheckoutStep;
use serde::{Deserialize, Serialize};

/// Stock check performed before checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartValidation {
    Ok,
    OutOfStock,
}

/// Payment-plan identifiers the platform computed for the current cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlans {
    #[serde(rename = "idPlanesPago")]
    pub plan_payment_id: String,
    #[serde(rename = "planInit")]
    pub plan_init: String,
    #[serde(rename = "planTracer")]
    pub plan_tracer: String,
}

impl PaymentPlans {
    /// Derive the three identifiers from a plan group, single-installment plan `51`
    pub fn from_group(group: &str) -> Self {
        Self {
            plan_payment_id: format!("{}_51", group),
            plan_init: format!("{}:1,51-1$(0%-0%)//", group),
            plan_tracer: format!("{};51,&", group),
        }
    }
}

/// Why a commit did not produce an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitFailureReason {
    OutOfStock,
    GenericError,
}

/// Tagged result of the commit step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitOutcome {
    Success {
        #[serde(rename = "orderId")]
        order_id: String,
    },
    Failure { reason: CommitFailureReason },
}

impl CommitOutcome {
    pub fn success(order_id: impl Into<String>) -> Self {
        Self::Success {
            order_id: order_id.into(),
        }
    }

    pub fn failure(reason: CommitFailureReason) -> Self {
        Self::Failure { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CommitOutcome::Success { .. })
    }
}

/// Failure category reported for an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    OutOfStock,
    GenericError,
    /// The batch deadline expired before the address was started
    Timeout,
}

impl From<CommitFailureReason> for FailureReason {
    fn from(reason: CommitFailureReason) -> Self {
        match reason {
            CommitFailureReason::OutOfStock => FailureReason::OutOfStock,
            CommitFailureReason::GenericError => FailureReason::GenericError,
        }
    }
}

/// Terminal status of one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Success {
        #[serde(rename = "orderId")]
        order_id: String,
    },
    Failure {
        reason: FailureReason,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<CheckoutStep>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

/// Outcome of checking out one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressOutcome {
    #[serde(rename = "direccionId")]
    pub address_id: AddressId,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    /// Pipeline attempts consumed, zero when the address never started
    pub attempts: u32,
}

impl AddressOutcome {
    pub fn success(address_id: AddressId, order_id: impl Into<String>, attempts: u32) -> Self {
        Self {
            address_id,
            status: OutcomeStatus::Success {
                order_id: order_id.into(),
            },
            attempts,
        }
    }

    pub fn failure(
        address_id: AddressId,
        reason: FailureReason,
        step: Option<CheckoutStep>,
        message: Option<String>,
        attempts: u32,
    ) -> Self {
        Self {
            address_id,
            status: OutcomeStatus::Failure {
                reason,
                step,
                message,
            },
            attempts,
        }
    }

    /// Outcome for an address the batch deadline prevented from starting
    pub fn not_started(address_id: AddressId) -> Self {
        Self::failure(
            address_id,
            FailureReason::Timeout,
            None,
            Some("batch deadline expired before the address was started".to_string()),
            0,
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success { .. })
    }

    pub fn order_id(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Success { order_id } => Some(order_id),
            OutcomeStatus::Failure { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match &self.status {
            OutcomeStatus::Success { .. } => None,
            OutcomeStatus::Failure { reason, .. } => Some(*reason),
        }
    }

    pub fn failed_step(&self) -> Option<CheckoutStep> {
        match &self.status {
            OutcomeStatus::Failure { step, .. } => *step,
            OutcomeStatus::Success { .. } => None,
        }
    }
}

/// Aggregated result of one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success: usize,
    pub failed: usize,
    /// Committed order ids, in input address order
    pub orders: Vec<String>,
    /// One outcome per requested address, in input order
    pub results: Vec<AddressOutcome>,
}

impl BatchResult {
    /// Aggregate outcomes that are already in input order
    pub fn from_outcomes(results: Vec<AddressOutcome>) -> Self {
        let orders: Vec<String> = results
            .iter()
            .filter_map(|outcome| outcome.order_id().map(str::to_string))
            .collect();
        let success = orders.len();

        Self {
            success,
            failed: results.len() - success,
            orders,
            results,
        }
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }
}
