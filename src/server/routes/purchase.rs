//! Batch purchase endpoint

use crate::core::types::BatchRequest;
use crate::server::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use tracing::info;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/purchase", web::post().to(purchase));
}

/// Run a batch checkout
/// POST /purchase
pub async fn purchase(
    state: web::Data<AppState>,
    payload: web::Json<BatchRequest>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    info!(
        addresses = request.delivery.addresses.len(),
        band = %request.delivery.band,
        "purchase requested"
    );

    let result = state
        .orchestrator
        .execute_batch(&request, state.runners.as_ref())
        .await?;

    Ok(HttpResponse::Ok().json(result))
}
