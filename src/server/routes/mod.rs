//! HTTP route modules

pub mod diagnostics;
pub mod purchase;
