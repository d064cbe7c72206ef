//! Runner error handling
//!
//! Single error type for every platform operation. The checkout pipeline
//! treats these as opaque step failures; only the login path inspects the
//! variant to decide whether the batch is rejected as an authentication error.

use std::time::Duration;

/// Result type for runner operations
pub type RunnerResult<T> = std::result::Result<T, RunnerError>;

/// Errors raised by a runner operation
#[derive(Debug, Clone, thiserror::Error)]
pub enum RunnerError {
    #[error("Authentication failed during {operation}: {message}")]
    Authentication {
        operation: &'static str,
        message: String,
    },

    #[error("Session error during {operation}: {message}")]
    Session {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} returned HTTP {status}")]
    Http { operation: &'static str, status: u16 },

    #[error("Platform rejected {operation}: code {code} {message}")]
    Platform {
        operation: &'static str,
        code: String,
        message: String,
    },

    #[error("Network error during {operation}: {message}")]
    Network {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} timed out after {elapsed_ms} ms")]
    Timeout {
        operation: &'static str,
        elapsed_ms: u64,
    },

    #[error("Failed to parse {operation} response: {message}")]
    ResponseParsing {
        operation: &'static str,
        message: String,
    },

    #[error("Runner not initialized before {operation}")]
    NotInitialized { operation: &'static str },

    #[error("Invalid checkout state for {operation}: {message}")]
    InvalidState {
        operation: &'static str,
        message: String,
    },

    #[error("Runner configuration error: {message}")]
    Configuration { message: String },
}

impl RunnerError {
    pub fn authentication(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            operation,
            message: message.into(),
        }
    }

    pub fn session(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Session {
            operation,
            message: message.into(),
        }
    }

    pub fn http(operation: &'static str, status: u16) -> Self {
        Self::Http { operation, status }
    }

    pub fn platform(
        operation: &'static str,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Platform {
            operation,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn network(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            operation,
            message: message.into(),
        }
    }

    pub fn timeout(operation: &'static str, elapsed: Duration) -> Self {
        Self::Timeout {
            operation,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn response_parsing(operation: &'static str, message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            operation,
            message: message.into(),
        }
    }

    pub fn not_initialized(operation: &'static str) -> Self {
        Self::NotInitialized { operation }
    }

    pub fn invalid_state(operation: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidState {
            operation,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Map a transport failure from the HTTP client
    pub fn from_reqwest(operation: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                operation,
                elapsed_ms: 0,
            }
        } else {
            Self::network(operation, err.to_string())
        }
    }

    /// Whether a fresh attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            RunnerError::Network { .. } | RunnerError::Timeout { .. } => true,
            RunnerError::Http { status, .. } => *status >= 500 || *status == 429,
            RunnerError::Platform { .. } => true,
            RunnerError::Authentication { .. }
            | RunnerError::Session { .. }
            | RunnerError::ResponseParsing { .. }
            | RunnerError::NotInitialized { .. }
            | RunnerError::InvalidState { .. }
            | RunnerError::Configuration { .. } => false,
        }
    }

    /// Whether the failure was a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, RunnerError::Timeout { .. })
    }
}
