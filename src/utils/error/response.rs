//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl GatewayError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            GatewayError::InvalidBand(_) => (StatusCode::BAD_REQUEST, "INVALID_BAND"),
            GatewayError::Auth(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR"),
            GatewayError::Runner(_) => (StatusCode::BAD_GATEWAY, "RUNNER_ERROR"),
            GatewayError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            GatewayError::Internal(_) | GatewayError::Yaml(_) | GatewayError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, code) = self.status_and_code();

        // Never echo internal details back to the caller
        let error = if status_code.is_server_error() && !matches!(self, GatewayError::Runner(_)) {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status_code).json(ErrorResponse {
            error,
            code: code.to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        })
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub timestamp: i64,
}
