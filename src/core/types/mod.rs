//! Core data model
//!
//! Request, session, per-address context and outcome types.

pub mod context;
pub mod outcome;
pub mod request;
pub mod session;
pub mod step;

pub use context::{CheckoutContext, CheckoutTemplate};
pub use outcome::{
    AddressOutcome, BatchResult, CartValidation, CommitFailureReason, CommitOutcome,
    FailureReason, OutcomeStatus, PaymentPlans,
};
pub use request::{
    AddressId, BatchRequest, CartConfig, CartMode, Credentials, DeliveryConfig, DeliveryType,
    PaymentConfig, PurchaseOptions,
};
pub use session::SessionHandle;
pub use step::CheckoutStep;
