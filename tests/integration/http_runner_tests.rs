//! HTTP runner against a mock platform

#[cfg(test)]
mod tests {
    use crate::common::RequestFactory;
    use checkout_gateway::config::{CheckoutConfig, PlatformConfig};
    use checkout_gateway::core::runner::http::endpoints;
    use checkout_gateway::core::types::{
        CheckoutStep, Credentials, FailureReason, SessionHandle,
    };
    use checkout_gateway::utils::error::GatewayError;
    use checkout_gateway::{
        BatchOrchestrator, CheckoutRunner, HttpRunner, HttpRunnerFactory, RunnerError,
    };
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "-8812";

    fn platform(server: &MockServer) -> PlatformConfig {
        PlatformConfig {
            base_url: server.uri(),
            timeout: 5,
            settle_delay_ms: 0,
            ..Default::default()
        }
    }

    fn ok_json(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(endpoints::SESSION_CONFIRMATION))
            .and(query_param("pushSite", "CotoDigital"))
            .respond_with(ok_json(json!({ "sessionConfirmationNumber": TOKEN })))
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path(endpoints::LOGIN))
            .and(query_param("_dynSessConf", TOKEN))
            .and(body_partial_json(json!({
                "login": "bot@example.com",
                "isAngular": "true"
            })))
            .respond_with(ok_json(json!({})))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_cart_steps(server: &MockServer, validation_code: &str) {
        Mock::given(method("POST"))
            .and(path(endpoints::CLEAR_CART))
            .respond_with(ok_json(json!({})))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(endpoints::CHANGE_DELIVERY_ADDRESS))
            .and(query_param("selectedAddress", "101"))
            .respond_with(ok_json(json!({})))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path(endpoints::REPEAT_ORDER))
            .and(body_partial_json(json!({ "numeroPedido": "A-77", "orderId": "o123" })))
            .respond_with(ok_json(json!({ "codigoError": "0" })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path(endpoints::VALIDATE_CART))
            .respond_with(ok_json(json!({ "codigoError": validation_code })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path(endpoints::REMOVE_OUT_OF_STOCK))
            .respond_with(ok_json(json!({})))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(endpoints::PAYMENT_PLANS))
            .and(query_param("fechaCobro", "20261020"))
            .respond_with(ok_json(json!({ "planesCuotas": [{ "grupo": 9 }] })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(endpoints::GET_CART))
            .respond_with(ok_json(json!({})))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path(endpoints::SHIPPING_COST))
            .respond_with(ok_json(json!({})))
            .mount(server)
            .await;
    }

    fn orchestrator() -> BatchOrchestrator {
        BatchOrchestrator::new(CheckoutConfig {
            retry_backoff_ms: 0,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_login_stores_session_token() {
        let server = MockServer::start().await;
        mount_login(&server).await;

        let runner = HttpRunner::new(platform(&server)).unwrap();
        runner.init().await.unwrap();
        runner
            .login(&Credentials::new("bot@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(runner.session_token().as_deref(), Some(TOKEN));

        runner.dispose().await.unwrap();
        assert_eq!(runner.session_token(), None);
    }

    #[tokio::test]
    async fn test_login_http_error_is_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(endpoints::SESSION_CONFIRMATION))
            .respond_with(ok_json(json!({ "sessionConfirmationNumber": TOKEN })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(endpoints::LOGIN))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let runner = HttpRunner::new(platform(&server)).unwrap();
        runner.init().await.unwrap();
        let err = runner
            .login(&Credentials::new("bot@example.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::Authentication { .. }));
        assert!(err.to_string().contains("401"));
        assert_eq!(runner.session_token(), None);
    }

    #[tokio::test]
    async fn test_missing_session_confirmation_is_session_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(endpoints::SESSION_CONFIRMATION))
            .respond_with(ok_json(json!({})))
            .mount(&server)
            .await;

        let runner = HttpRunner::new(platform(&server)).unwrap();
        runner.init().await.unwrap();
        let err = runner
            .login(&Credentials::new("bot@example.com", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::Session { .. }));
    }

    #[tokio::test]
    async fn test_single_cart_runner_is_sequential() {
        let server = MockServer::start().await;
        let runner = HttpRunner::new(platform(&server)).unwrap();

        assert!(!runner.supports_concurrent_checkouts());
    }

    #[tokio::test]
    async fn test_calls_before_init_fail() {
        let server = MockServer::start().await;
        let runner = HttpRunner::new(platform(&server)).unwrap();

        let err = runner
            .clear_cart(&SessionHandle::new(TOKEN, "bot@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::NotInitialized { .. }));
    }

    #[tokio::test]
    async fn test_batch_commits_with_resolved_delivery() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_cart_steps(&server, "10").await;

        Mock::given(method("POST"))
            .and(path(endpoints::COMMIT_ORDER))
            .and(body_string_contains("bandasEntrega=1_13_18"))
            .and(body_string_contains("fechasEntrega=1_20261020"))
            .and(body_string_contains("idPlanesPago=9_51"))
            .and(body_string_contains("_dynSessConf=-8812"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"codigoError":"0","orderId":"555"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let factory = HttpRunnerFactory::new(platform(&server));
        let request = RequestFactory::create(&[101], "TARDE");

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(result.success, 1);
        assert_eq!(result.orders, vec!["555".to_string()]);

        let received = server.received_requests().await.unwrap();
        let removals = received
            .iter()
            .filter(|r| r.url.path() == endpoints::REMOVE_OUT_OF_STOCK)
            .count();
        assert_eq!(removals, 1);
    }

    #[tokio::test]
    async fn test_commit_out_of_stock_is_reported() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_cart_steps(&server, "0").await;

        Mock::given(method("POST"))
            .and(path(endpoints::COMMIT_ORDER))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"codigoError":"1","sinStock":true}"#),
            )
            .mount(&server)
            .await;

        let factory = HttpRunnerFactory::new(platform(&server));
        let request = RequestFactory::create(&[101], "TARDE");

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(result.failed, 1);
        assert_eq!(
            result.results[0].failure_reason(),
            Some(FailureReason::OutOfStock)
        );

        let received = server.received_requests().await.unwrap();
        assert!(
            received
                .iter()
                .all(|r| r.url.path() != endpoints::REMOVE_OUT_OF_STOCK)
        );
    }

    #[tokio::test]
    async fn test_unparseable_commit_is_generic_error() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_cart_steps(&server, "0").await;

        Mock::given(method("POST"))
            .and(path(endpoints::COMMIT_ORDER))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>error</html>"))
            .mount(&server)
            .await;

        let factory = HttpRunnerFactory::new(platform(&server));
        let request = RequestFactory::create(&[101], "TARDE");

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(
            result.results[0].failure_reason(),
            Some(FailureReason::GenericError)
        );
        assert_eq!(result.results[0].failed_step(), Some(CheckoutStep::CommitOrder));
    }

    #[tokio::test]
    async fn test_rejected_login_fails_whole_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(endpoints::SESSION_CONFIRMATION))
            .respond_with(ok_json(json!({ "sessionConfirmationNumber": TOKEN })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(endpoints::LOGIN))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(endpoints::CLEAR_CART))
            .respond_with(ok_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let factory = HttpRunnerFactory::new(platform(&server));
        let request = RequestFactory::create(&[101, 102], "TARDE");

        let err = orchestrator()
            .execute_batch(&request, &factory)
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Auth(_)));
    }
}
