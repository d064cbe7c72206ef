//! Development-only platform checks

use crate::core::runner::RunnerError;
use crate::core::types::Credentials;
use crate::server::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginTestResponse {
    pub logged: bool,
    pub session_token: Option<String>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login-test", web::get().to(login_test));
}

/// Log in with the probe account and release the runner
/// GET /login-test
pub async fn login_test(state: web::Data<AppState>) -> Result<HttpResponse> {
    let probe = state
        .config
        .platform()
        .probe
        .clone()
        .ok_or_else(|| GatewayError::validation("No probe credentials configured"))?;
    let credentials = Credentials::new(probe.username, probe.password);

    let runner = state.runners.create().map_err(GatewayError::Runner)?;

    let outcome = async {
        runner.init().await?;
        runner.login(&credentials).await?;
        Ok::<_, RunnerError>(runner.session_token())
    }
    .await;

    if let Err(e) = runner.dispose().await {
        warn!(error = %e, "failed to dispose runner after login check");
    }

    let session_token = outcome?;
    Ok(HttpResponse::Ok().json(LoginTestResponse {
        logged: session_token.is_some(),
        session_token,
    }))
}
