//! Interpretation of platform responses
//!
//! The platform answers with loosely typed JSON: `codigoError` arrives as a
//! string or a number, flags as booleans or strings. These functions turn
//! it into tagged types and never touch the network.

use crate::core::runner::error::{RunnerError, RunnerResult};
use crate::core::types::{CartValidation, CommitFailureReason, CommitOutcome, PaymentPlans};
use crate::utils::Sanitization;
use serde_json::Value;

/// `codigoError` signalling missing stock at validation time
const VALIDATION_OUT_OF_STOCK: &str = "10";

const LOGGED_BODY_LIMIT: usize = 2048;

/// `codigoError` normalized to a string
pub fn error_code(body: &Value) -> Option<String> {
    body.get("codigoError").and_then(scalar_to_string)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// JavaScript-style truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn session_confirmation(body: &Value) -> RunnerResult<String> {
    body.get("sessionConfirmationNumber")
        .and_then(scalar_to_string)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            RunnerError::session("sessionConfirmation", "No se pudo obtener _dynSessConf")
        })
}

pub fn repeat_order(body: &Value) -> RunnerResult<()> {
    match error_code(body).as_deref() {
        Some("0") => Ok(()),
        code => Err(RunnerError::platform(
            "repeatOrder",
            code.unwrap_or("none"),
            body.get("mensajeError")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        )),
    }
}

pub fn cart_validation(body: &Value) -> CartValidation {
    match error_code(body).as_deref() {
        Some(VALIDATION_OUT_OF_STOCK) => CartValidation::OutOfStock,
        _ => CartValidation::Ok,
    }
}

/// Plans derived from the group of the first offered installment plan
pub fn payment_plans(body: &Value) -> RunnerResult<PaymentPlans> {
    let group = body
        .get("planesCuotas")
        .and_then(|plans| plans.get(0))
        .and_then(|plan| plan.get("grupo"))
        .filter(|group| is_truthy(group))
        .and_then(scalar_to_string)
        .ok_or_else(|| {
            RunnerError::response_parsing("getPaymentPlans", "No se pudo obtener grupo de plan")
        })?;

    Ok(PaymentPlans::from_group(&group))
}

/// Commit result from the raw body; anything unrecognized is a generic error
pub fn commit(raw: &str) -> CommitOutcome {
    let Ok(body) = serde_json::from_str::<Value>(raw) else {
        return CommitOutcome::failure(CommitFailureReason::GenericError);
    };

    let code = error_code(&body);
    let order_id = body
        .get("orderId")
        .filter(|id| is_truthy(id))
        .and_then(scalar_to_string);

    match (code.as_deref(), order_id) {
        (Some("0"), Some(order_id)) => CommitOutcome::success(order_id),
        (Some("1"), _) if body.get("sinStock").is_some_and(is_truthy) => {
            CommitOutcome::failure(CommitFailureReason::OutOfStock)
        }
        _ => CommitOutcome::failure(CommitFailureReason::GenericError),
    }
}

/// Platform body prepared for a log line: secrets redacted, length bounded
pub fn loggable_body(raw: &str) -> String {
    let sanitized = Sanitization::sanitize_log_data(raw);
    match sanitized.char_indices().nth(LOGGED_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &sanitized[..cut]),
        None => sanitized,
    }
}
