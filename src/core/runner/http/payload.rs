//! Request bodies and query strings sent to the platform

use crate::config::PlatformConfig;
use crate::core::runner::error::{RunnerError, RunnerResult};
use crate::core::types::CheckoutContext;
use serde_json::{Value, json};

/// `idTipoGrupo` used when asking for installment plans
const PLAN_GROUP_TYPE: &str = "0";

pub type Params = Vec<(&'static str, String)>;

/// `pushSite` and `_dynSessConf`, carried by every call
pub fn session_params(config: &PlatformConfig, token: &str) -> Params {
    vec![
        ("pushSite", config.push_site.clone()),
        ("_dynSessConf", token.to_string()),
    ]
}

pub fn login_body(username: &str, password: &str) -> Value {
    json!({
        "login": username,
        "password": password,
        "isAngular": "true",
    })
}

pub fn repeat_order_body(order_number: &str, order_id: &str) -> Value {
    json!({
        "numeroPedido": order_number,
        "orderId": order_id,
    })
}

pub fn payment_plan_params(config: &PlatformConfig, token: &str, ctx: &CheckoutContext) -> Params {
    let mut params = session_params(config, token);
    params.extend([
        ("idTipoGrupo", PLAN_GROUP_TYPE.to_string()),
        ("idFormaPago", ctx.payment_method_id().to_string()),
        ("idTarjetaBanco", ctx.card_bank_id().to_string()),
        ("fechaCobro", ctx.billing_date().to_string()),
        ("cobroOnline", config.commit.online_charge.clone()),
    ]);
    params
}

/// Shipping-cost body; `envios` and `cupones` are JSON documents sent as strings
pub fn shipping_cost_body(config: &PlatformConfig, ctx: &CheckoutContext) -> Value {
    let envios = json!({
        "envios": [{
            "id": 0,
            "idTipoGrupo": config.shipping.group_type,
            "costoEnvio": config.shipping.cost,
            "fechaEnvio": ctx.delivery_date(),
            "bandasEntrega": ctx.band_code(),
            "idServicioDisponible": config.shipping.service_id,
            "sinCosto": false,
        }],
        "importeTotal": 0,
    });
    let cupones = json!({ "cupones": [] });

    json!({
        "envios": envios.to_string(),
        "cupones": cupones.to_string(),
    })
}

/// Form fields of the commit call. Fails if no plans were fetched.
pub fn commit_form(
    config: &PlatformConfig,
    token: &str,
    ctx: &CheckoutContext,
) -> RunnerResult<Params> {
    let plans = ctx.plans().ok_or_else(|| {
        RunnerError::invalid_state("commitOrder", "payment plans were not fetched")
    })?;

    let mut form = session_params(config, token);
    form.extend([
        ("idFormaPago", ctx.payment_method_id().to_string()),
        ("idTarjetaBanco", ctx.card_bank_id().to_string()),
        ("idPlanesPago", plans.plan_payment_id.clone()),
        ("fechasCobro", format!("1_{}", ctx.billing_date())),
        ("fechasEntrega", format!("1_{}", ctx.delivery_date())),
        ("bandasEntrega", ctx.band_code().to_string()),
        ("idTiposPago", config.commit.payment_types.clone()),
        ("idTiposServicioEntrega", config.commit.delivery_service_types.clone()),
        ("idCondicionIVA", "0".to_string()),
        ("idDatosFacturacion", "0".to_string()),
        ("cobroOnline", config.commit.online_charge.clone()),
        ("participaSorteo", "NO".to_string()),
        ("pin", config.commit.pin.clone()),
    ]);
    Ok(form)
}
