//! Utility modules for the Gateway
//!
//! - **error**: crate-wide error type and its HTTP mapping
//! - **logging**: subscriber setup and log sanitization

pub mod error;
pub mod logging;

pub use logging::Sanitization;
