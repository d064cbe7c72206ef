//! Batch purchase request
//!
//! Wire names follow the platform's Spanish vocabulary (`usuario`, `entrega`,
//! `carrito`, `pago`, `opciones`); Rust field names are English.

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

/// Platform identifier of a saved delivery address
pub type AddressId = u64;

/// A batch purchase request, immutable once accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Account used for the single login of the batch
    #[serde(rename = "usuario")]
    pub credentials: Credentials,
    /// Where and when to deliver
    #[serde(rename = "entrega")]
    pub delivery: DeliveryConfig,
    /// Which previous order to replicate
    #[serde(rename = "carrito")]
    pub cart: CartConfig,
    /// Payment method used at commit time
    #[serde(rename = "pago")]
    pub payment: PaymentConfig,
    /// Optional execution tuning
    #[serde(rename = "opciones", default)]
    pub options: Option<PurchaseOptions>,
}

impl BatchRequest {
    /// Execution options, defaulted when the request carries none
    pub fn options(&self) -> PurchaseOptions {
        self.options.clone().unwrap_or_default()
    }

    /// Structural checks that need no platform access
    pub fn validate(&self) -> Result<()> {
        if self.delivery.addresses.is_empty() {
            return Err(GatewayError::validation(
                "entrega.direcciones must contain at least one address",
            ));
        }
        if self.credentials.username.trim().is_empty() {
            return Err(GatewayError::validation("usuario.username cannot be empty"));
        }
        if self.cart.order_number.trim().is_empty() || self.cart.order_id.trim().is_empty() {
            return Err(GatewayError::validation(
                "carrito.numeroPedido and carrito.orderId are required",
            ));
        }
        if self.payment.card_bank_id.trim().is_empty() {
            return Err(GatewayError::validation("pago.tarjetaBancoId cannot be empty"));
        }
        Ok(())
    }
}

/// Account credentials
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Delivery mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryType {
    #[default]
    Delivery,
    Pickup,
}

/// Delivery configuration shared by every address of the batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(rename = "tipo", default)]
    pub kind: DeliveryType,
    /// Addresses to check out, in the order results are reported
    #[serde(rename = "direcciones")]
    pub addresses: Vec<AddressId>,
    /// Delivery date, `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    pub date: String,
    /// Logical band (`MANIANA`, `TARDE`, `NOCHE`); kept raw so an unknown
    /// value is rejected by the band resolver rather than the JSON decoder
    #[serde(rename = "banda")]
    pub band: String,
}

/// How the cart is filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartMode {
    #[default]
    RepetirPedido,
}

/// Reference to the order being replicated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(rename = "modo", default)]
    pub mode: CartMode,
    #[serde(rename = "numeroPedido")]
    pub order_number: String,
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// Payment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    #[serde(rename = "formaPagoId")]
    pub payment_method_id: u32,
    #[serde(rename = "tarjetaBancoId")]
    pub card_bank_id: String,
}

/// Optional execution options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOptions {
    /// Retry an address whose commit reported out of stock
    #[serde(rename = "reintentarSinStock", default)]
    pub retry_out_of_stock: bool,
    /// Extra attempts per address; each one starts over from a clean cart
    #[serde(rename = "maxReintentos", default)]
    pub max_retries: u32,
    /// Refresh checkout once more and re-commit after a generic commit error
    #[serde(rename = "fallbackRefrescoCheckout", default)]
    pub fallback_refresh: bool,
    /// Upper bound of address pipelines in flight
    #[serde(default)]
    pub concurrency: Option<usize>,
}
