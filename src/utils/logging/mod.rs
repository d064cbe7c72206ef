//! Logging utilities

mod init;
mod sanitization;

pub use init::init_tracing;
pub use sanitization::Sanitization;
