//! Core functionality for the Gateway
//!
//! Band resolution, the runner capability, the session manager, the
//! per-address checkout pipeline and the batch orchestrator.

pub mod band;
pub mod batch;
pub mod checkout;
pub mod runner;
pub mod session;
pub mod types;
