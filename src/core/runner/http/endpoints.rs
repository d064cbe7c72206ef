//! Platform REST actor paths

use crate::core::runner::error::{RunnerError, RunnerResult};
use url::Url;

pub const SESSION_CONFIRMATION: &str =
    "/rest/model/atg/rest/SessionConfirmationActor/getSessionConfirmationNumber";
pub const LOGIN: &str = "/rest/model/atg/actors/cProfileActor/login";
pub const CHANGE_DELIVERY_ADDRESS: &str =
    "/rest/model/atg/actors/cProfileActor/changeDeliveryAddress";
pub const REPEAT_ORDER: &str = "/rest/model/atg/actors/cProfileActor/getRepetirPedido";
pub const CLEAR_CART: &str = "/rest/model/atg/actors/cCarritoActor/limpiarCarrito";
pub const GET_CART: &str = "/rest/model/atg/actors/cCarritoActor/getCarrito";
pub const REMOVE_OUT_OF_STOCK: &str = "/rest/model/atg/actors/cCarritoActor/eliminarSinStock";
pub const VALIDATE_CART: &str = "/rest/model/atg/actors/cvActor/validarCarritoPreCheckout";
pub const PAYMENT_PLANS: &str = "/rest/model/atg/actors/cvActor/getPlanesCuotasOfertas";
pub const SHIPPING_COST: &str = "/rest/model/atg/actors/cvActor/getCostoEnvio";
pub const COMMIT_ORDER: &str = "/rest/model/atg/actors/cvActor/commitOrder";

/// Resolves actor paths against the configured host
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> RunnerResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| RunnerError::configuration(format!("Invalid base_url: {}", e)))?;
        if base.cannot_be_a_base() {
            return Err(RunnerError::configuration(format!(
                "base_url cannot be used as a base: {}",
                base_url
            )));
        }
        Ok(Self { base })
    }

    pub fn url(&self, path: &str) -> RunnerResult<Url> {
        self.base
            .join(path)
            .map_err(|e| RunnerError::configuration(format!("Invalid endpoint {}: {}", path, e)))
    }
}
