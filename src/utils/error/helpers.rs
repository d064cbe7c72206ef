//! Helper functions for creating specific error types

use super::types::GatewayError;

impl GatewayError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_band<S: Into<String>>(band: S) -> Self {
        Self::InvalidBand(band.into())
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error was caused by the request itself
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::Validation(_) | GatewayError::InvalidBand(_) | GatewayError::Auth(_)
        )
    }
}
