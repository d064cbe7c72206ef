//! Platform runner over HTTP
//!
//! Talks to the platform's REST actors with one `reqwest` client whose
//! cookie jar carries the authenticated session.

pub mod endpoints;
pub mod payload;
pub mod response;

use super::error::{RunnerError, RunnerResult};
use super::{CheckoutRunner, RunnerFactory};
use crate::config::PlatformConfig;
use crate::core::types::{
    AddressId, CartValidation, CheckoutContext, CommitOutcome, Credentials, PaymentPlans,
    SessionHandle,
};
use async_trait::async_trait;
use endpoints::Endpoints;
use parking_lot::RwLock;
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runner issuing platform calls with `reqwest`
pub struct HttpRunner {
    config: PlatformConfig,
    endpoints: Endpoints,
    client: RwLock<Option<Client>>,
    token: RwLock<Option<String>>,
}

impl HttpRunner {
    pub fn new(config: PlatformConfig) -> RunnerResult<Self> {
        let endpoints = Endpoints::new(&config.base_url)?;
        Ok(Self {
            config,
            endpoints,
            client: RwLock::new(None),
            token: RwLock::new(None),
        })
    }

    fn client(&self, operation: &'static str) -> RunnerResult<Client> {
        self.client
            .read()
            .clone()
            .ok_or_else(|| RunnerError::not_initialized(operation))
    }

    fn ensure_success(operation: &'static str, response: Response) -> RunnerResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            debug!(operation, status = status.as_u16(), "platform returned an error status");
            Err(RunnerError::http(operation, status.as_u16()))
        }
    }

    async fn json_body(operation: &'static str, response: Response) -> RunnerResult<Value> {
        response
            .json::<Value>()
            .await
            .map_err(|e| RunnerError::response_parsing(operation, e.to_string()))
    }

    async fn get(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(&'static str, String)],
    ) -> RunnerResult<Response> {
        let client = self.client(operation)?;
        let response = client
            .get(self.endpoints.url(path)?)
            .query(params)
            .send()
            .await
            .map_err(|e| RunnerError::from_reqwest(operation, e))?;
        Self::ensure_success(operation, response)
    }

    async fn post_json(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> RunnerResult<Response> {
        let client = self.client(operation)?;
        let mut request = client.post(self.endpoints.url(path)?).query(params);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| RunnerError::from_reqwest(operation, e))?;
        Self::ensure_success(operation, response)
    }

    async fn fetch_session_confirmation(&self) -> RunnerResult<String> {
        let operation = "sessionConfirmation";
        let params = [("pushSite", self.config.push_site.clone())];
        let reply = self
            .get(operation, endpoints::SESSION_CONFIRMATION, &params)
            .await
            .map_err(|e| RunnerError::session(operation, e.to_string()))?;
        let body = Self::json_body(operation, reply)
            .await
            .map_err(|e| RunnerError::session(operation, e.to_string()))?;
        response::session_confirmation(&body)
    }
}

#[async_trait]
impl CheckoutRunner for HttpRunner {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn init(&self) -> RunnerResult<()> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(self.config.timeout())
            .danger_accept_invalid_certs(self.config.accept_invalid_certs)
            .build()
            .map_err(|e| {
                RunnerError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        *self.client.write() = Some(client);
        debug!(base_url = %self.config.base_url, "http runner initialized");
        Ok(())
    }

    async fn dispose(&self) -> RunnerResult<()> {
        // Dropping the client drops the cookie jar with the session
        self.client.write().take();
        self.token.write().take();
        debug!("http runner disposed");
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> RunnerResult<()> {
        let token = self.fetch_session_confirmation().await?;

        let params = payload::session_params(&self.config, &token);
        let body = payload::login_body(&credentials.username, &credentials.password);
        self.post_json("login", endpoints::LOGIN, &params, Some(&body))
            .await
            .map_err(|e| match e {
                RunnerError::Http { status, .. } => {
                    RunnerError::authentication("login", format!("HTTP error en login: {}", status))
                }
                other => other,
            })?;

        *self.token.write() = Some(token);
        info!("platform login succeeded");
        Ok(())
    }

    fn session_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    async fn clear_cart(&self, session: &SessionHandle) -> RunnerResult<()> {
        let params = payload::session_params(&self.config, session.token());
        self.post_json("clearCart", endpoints::CLEAR_CART, &params, None)
            .await?;
        Ok(())
    }

    async fn select_address(
        &self,
        session: &SessionHandle,
        address_id: AddressId,
    ) -> RunnerResult<()> {
        let mut params = payload::session_params(&self.config, session.token());
        params.push(("selectedAddress", address_id.to_string()));
        self.get("selectAddress", endpoints::CHANGE_DELIVERY_ADDRESS, &params)
            .await?;
        Ok(())
    }

    async fn repeat_order(
        &self,
        session: &SessionHandle,
        order_number: &str,
        order_id: &str,
    ) -> RunnerResult<()> {
        let operation = "repeatOrder";
        let params = payload::session_params(&self.config, session.token());
        let body = payload::repeat_order_body(order_number, order_id);
        let reply = self
            .post_json(operation, endpoints::REPEAT_ORDER, &params, Some(&body))
            .await?;
        let body = Self::json_body(operation, reply).await?;
        response::repeat_order(&body)
    }

    async fn validate_cart(&self, session: &SessionHandle) -> RunnerResult<CartValidation> {
        let operation = "validateCart";
        let params = payload::session_params(&self.config, session.token());
        let reply = self
            .post_json(operation, endpoints::VALIDATE_CART, &params, None)
            .await?;
        let body = Self::json_body(operation, reply).await?;
        Ok(response::cart_validation(&body))
    }

    async fn remove_out_of_stock(&self, session: &SessionHandle) -> RunnerResult<()> {
        let params = payload::session_params(&self.config, session.token());
        self.post_json("removeOutOfStock", endpoints::REMOVE_OUT_OF_STOCK, &params, None)
            .await?;
        Ok(())
    }

    async fn payment_plans(
        &self,
        session: &SessionHandle,
        ctx: &CheckoutContext,
    ) -> RunnerResult<PaymentPlans> {
        let operation = "getPaymentPlans";
        let params = payload::payment_plan_params(&self.config, session.token(), ctx);
        let reply = self.get(operation, endpoints::PAYMENT_PLANS, &params).await?;
        let body = Self::json_body(operation, reply).await?;
        response::payment_plans(&body)
    }

    async fn refresh_checkout(
        &self,
        session: &SessionHandle,
        ctx: &CheckoutContext,
    ) -> RunnerResult<()> {
        let token = session.token();

        let params = payload::session_params(&self.config, token);
        self.get("getCarrito", endpoints::GET_CART, &params).await?;

        let params = payload::payment_plan_params(&self.config, token, ctx);
        self.get("getPlanesCuotasOfertas", endpoints::PAYMENT_PLANS, &params)
            .await?;

        let params = payload::session_params(&self.config, token);
        let body = payload::shipping_cost_body(&self.config, ctx);
        self.post_json("getCostoEnvio", endpoints::SHIPPING_COST, &params, Some(&body))
            .await?;

        // The platform applies the shipping group asynchronously
        tokio::time::sleep(self.config.settle_delay()).await;
        Ok(())
    }

    async fn commit_order(
        &self,
        session: &SessionHandle,
        ctx: &CheckoutContext,
    ) -> RunnerResult<CommitOutcome> {
        let operation = "commitOrder";
        let form = payload::commit_form(&self.config, session.token(), ctx)?;
        let client = self.client(operation)?;

        let reply = client
            .post(self.endpoints.url(endpoints::COMMIT_ORDER)?)
            .form(&form)
            .send()
            .await
            .map_err(|e| RunnerError::from_reqwest(operation, e))?;

        let status = reply.status();
        let raw = reply
            .text()
            .await
            .map_err(|e| RunnerError::from_reqwest(operation, e))?;

        let outcome = response::commit(&raw);
        if !outcome.is_success() {
            warn!(
                address_id = ctx.address_id(),
                status = status.as_u16(),
                body_len = raw.len(),
                "commit rejected by platform"
            );
            debug!(
                address_id = ctx.address_id(),
                body = %response::loggable_body(&raw),
                "rejected commit response"
            );
        }
        Ok(outcome)
    }
}

/// Builds an [`HttpRunner`] per batch from the platform configuration
#[derive(Debug, Clone)]
pub struct HttpRunnerFactory {
    config: PlatformConfig,
}

impl HttpRunnerFactory {
    pub fn new(config: PlatformConfig) -> Self {
        Self { config }
    }
}

impl RunnerFactory for HttpRunnerFactory {
    fn create(&self) -> RunnerResult<Arc<dyn CheckoutRunner>> {
        Ok(Arc::new(HttpRunner::new(self.config.clone())?))
    }
}
