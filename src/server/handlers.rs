//! HTTP route handlers

use crate::utils::error::GatewayError;
use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Malformed JSON bodies are reported like any other validation error
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    GatewayError::validation(format!("Invalid request body: {}", err)).into()
}
