//! Error types for the Gateway

use crate::core::runner::RunnerError;
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
///
/// Only the batch-level failures (validation, authentication, runner
/// acquisition) ever reach a caller as an error. Everything that goes wrong
/// inside one address pipeline is absorbed into that address's outcome.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed batch request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown logical delivery band
    #[error("Banda inválida: {0}")]
    InvalidBand(String),

    /// Platform rejected the credentials or issued no session
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The runner could not be created or initialized
    #[error("Runner error: {0}")]
    Runner(RunnerError),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RunnerError> for GatewayError {
    fn from(err: RunnerError) -> Self {
        match err {
            RunnerError::Authentication { message, .. } => GatewayError::Auth(message),
            RunnerError::Session { message, .. } => GatewayError::Auth(message),
            other => GatewayError::Runner(other),
        }
    }
}
