//! Request fixtures

use checkout_gateway::core::types::{AddressId, BatchRequest, PurchaseOptions};
use serde_json::{Value, json};

pub struct RequestFactory;

impl RequestFactory {
    /// Request body as sent by a client
    pub fn body(addresses: &[AddressId], band: &str) -> Value {
        json!({
            "usuario": {"username": "bot@example.com", "password": "secret"},
            "entrega": {
                "tipo": "DELIVERY",
                "direcciones": addresses,
                "fecha": "2026-10-20",
                "banda": band
            },
            "carrito": {"modo": "REPETIR_PEDIDO", "numeroPedido": "A-77", "orderId": "o123"},
            "pago": {"formaPagoId": 3, "tarjetaBancoId": "45"}
        })
    }

    pub fn create(addresses: &[AddressId], band: &str) -> BatchRequest {
        serde_json::from_value(Self::body(addresses, band))
            .expect("fixture request must deserialize")
    }

    pub fn with_options(
        addresses: &[AddressId],
        band: &str,
        options: PurchaseOptions,
    ) -> BatchRequest {
        let mut request = Self::create(addresses, band);
        request.options = Some(options);
        request
    }
}
