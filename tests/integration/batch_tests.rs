//! Batch orchestration against the scripted runner

#[cfg(test)]
mod tests {
    use crate::assert_err;
    use crate::common::fake_runner::commit_failure;
    use crate::common::{FakeFactory, FakeScript, RequestFactory};
    use checkout_gateway::config::CheckoutConfig;
    use checkout_gateway::core::types::{
        CheckoutStep, CommitFailureReason, CommitOutcome, FailureReason, PaymentPlans,
        PurchaseOptions,
    };
    use checkout_gateway::utils::error::GatewayError;
    use checkout_gateway::{BatchOrchestrator, RunnerError};
    use std::collections::HashMap;
    use std::time::Duration;

    fn orchestrator() -> BatchOrchestrator {
        BatchOrchestrator::new(CheckoutConfig {
            retry_backoff_ms: 0,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_remediated_and_failed_addresses() {
        let factory = FakeFactory::new(FakeScript {
            out_of_stock: vec![101],
            commits: HashMap::from([
                (101, CommitOutcome::success("555")),
                (102, commit_failure(CommitFailureReason::GenericError)),
            ]),
            ..Default::default()
        });
        let request = RequestFactory::create(&[101, 102], "TARDE");

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(result.success, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.orders, vec!["555".to_string()]);
        assert_eq!(result.results[0].address_id, 101);
        assert_eq!(result.results[1].address_id, 102);
        assert_eq!(
            result.results[1].failure_reason(),
            Some(FailureReason::GenericError)
        );
        assert_eq!(
            result.results[1].failed_step(),
            Some(CheckoutStep::CommitOrder)
        );

        let runner = factory.runner();
        assert_eq!(runner.count("login"), 1);
        assert_eq!(runner.count("removeOutOfStock"), 1);
        for record in runner.commit_records() {
            assert_eq!(record.band_code, "1_13_18");
            assert_eq!(record.delivery_date, "20261020");
        }
    }

    #[tokio::test]
    async fn test_steps_run_in_order_for_each_address() {
        let factory = FakeFactory::new(FakeScript::default());
        let request = RequestFactory::create(&[7], "NOCHE");

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(result.orders, vec!["order-7".to_string()]);
        assert_eq!(
            factory.runner().operations(),
            vec![
                "init",
                "login",
                "clearCart",
                "selectAddress",
                "repeatOrder",
                "validateCart",
                "getPaymentPlans",
                "refreshCheckout",
                "commitOrder",
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_band_never_touches_runner() {
        let factory = FakeFactory::new(FakeScript::default());
        let request = RequestFactory::create(&[1, 2], "MEDIODIA");

        let err = assert_err!(orchestrator().execute_batch(&request, &factory).await);

        assert!(matches!(err, GatewayError::InvalidBand(_)));
        assert_eq!(factory.created(), 0);
        assert!(factory.runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_lowercase_band_is_rejected() {
        let factory = FakeFactory::new(FakeScript::default());
        let request = RequestFactory::create(&[1], "tarde");

        let err = assert_err!(orchestrator().execute_batch(&request, &factory).await);

        assert!(matches!(err, GatewayError::InvalidBand(_)));
        assert_eq!(factory.created(), 0);
    }

    #[tokio::test]
    async fn test_runner_disposed_once_after_success() {
        let factory = FakeFactory::new(FakeScript::default());
        let request = RequestFactory::create(&[1, 2, 3], "MANIANA");

        orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(factory.created(), 1);
        assert_eq!(factory.runner().inits(), 1);
        assert_eq!(factory.runner().disposals(), 1);
    }

    #[tokio::test]
    async fn test_login_failure_rejects_batch_and_disposes() {
        let factory = FakeFactory::new(FakeScript {
            login_error: Some(RunnerError::authentication("login", "HTTP error en login: 401")),
            ..Default::default()
        });
        let request = RequestFactory::create(&[1, 2], "TARDE");

        let err = assert_err!(orchestrator().execute_batch(&request, &factory).await);

        assert!(matches!(err, GatewayError::Auth(_)));
        assert_eq!(factory.runner().disposals(), 1);
        assert_eq!(factory.runner().count("clearCart"), 0);
    }

    #[tokio::test]
    async fn test_init_failure_still_disposes() {
        let factory = FakeFactory::new(FakeScript {
            init_error: Some(RunnerError::configuration("no client")),
            ..Default::default()
        });
        let request = RequestFactory::create(&[1], "TARDE");

        let err = assert_err!(orchestrator().execute_batch(&request, &factory).await);

        assert!(matches!(err, GatewayError::Runner(_)));
        assert_eq!(factory.runner().disposals(), 1);
        assert_eq!(factory.runner().count("login"), 0);
    }

    #[tokio::test]
    async fn test_factory_failure_is_runner_error() {
        let factory = FakeFactory::failing(RunnerError::configuration("no browser"));
        let request = RequestFactory::create(&[1], "TARDE");

        let err = assert_err!(orchestrator().execute_batch(&request, &factory).await);

        assert!(matches!(err, GatewayError::Runner(_)));
        assert_eq!(factory.created(), 1);
    }

    #[tokio::test]
    async fn test_failed_address_does_not_stop_the_others() {
        let factory = FakeFactory::new(FakeScript {
            step_failures: HashMap::from([(
                2,
                ("repeatOrder", RunnerError::platform("repeatOrder", "3", "pedido inexistente")),
            )]),
            ..Default::default()
        });
        let request = RequestFactory::create(&[1, 2, 3], "TARDE");

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(result.total(), 3);
        assert_eq!(result.success, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.orders, vec!["order-1".to_string(), "order-3".to_string()]);
        assert_eq!(result.results[1].failed_step(), Some(CheckoutStep::RepeatOrder));
        assert_eq!(factory.runner().count("clearCart"), 3);
        assert_eq!(factory.runner().count("login"), 1);
        assert_eq!(factory.runner().disposals(), 1);
    }

    #[tokio::test]
    async fn test_counts_always_match_addresses() {
        let factory = FakeFactory::new(FakeScript {
            commits: HashMap::from([
                (2, commit_failure(CommitFailureReason::OutOfStock)),
                (4, commit_failure(CommitFailureReason::GenericError)),
            ]),
            ..Default::default()
        });
        let request = RequestFactory::create(&[1, 2, 3, 4], "NOCHE");

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(result.success + result.failed, 4);
        assert_eq!(result.orders.len(), result.success);
        assert_eq!(
            result.results[1].failure_reason(),
            Some(FailureReason::OutOfStock)
        );
    }

    #[tokio::test]
    async fn test_concurrent_results_keep_input_order() {
        let factory = FakeFactory::new(FakeScript {
            concurrent: true,
            commit_delays: HashMap::from([
                (10, Duration::from_millis(120)),
                (20, Duration::from_millis(80)),
                (30, Duration::from_millis(40)),
                (40, Duration::from_millis(0)),
            ]),
            ..Default::default()
        });
        let request = RequestFactory::with_options(
            &[10, 20, 30, 40],
            "TARDE",
            PurchaseOptions {
                concurrency: Some(4),
                ..Default::default()
            },
        );

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        let ids: Vec<_> = result.results.iter().map(|o| o.address_id).collect();
        assert_eq!(ids, vec![10, 20, 30, 40]);
        assert_eq!(
            result.orders,
            vec!["order-10", "order-20", "order-30", "order-40"]
        );
        assert!(factory.runner().peak_in_flight() > 1);

        // Each commit only sees the plans fetched for its own address
        let records = factory.runner().commit_records();
        assert_eq!(records.len(), 4);
        for record in records {
            assert_eq!(
                record.plans,
                Some(PaymentPlans::from_group(&record.address_id.to_string()))
            );
        }
    }

    #[tokio::test]
    async fn test_sequential_runner_caps_concurrency() {
        let factory = FakeFactory::new(FakeScript {
            commit_delays: HashMap::from([
                (1, Duration::from_millis(30)),
                (2, Duration::from_millis(30)),
            ]),
            ..Default::default()
        });
        let request = RequestFactory::with_options(
            &[1, 2, 3],
            "TARDE",
            PurchaseOptions {
                concurrency: Some(4),
                ..Default::default()
            },
        );

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(result.success, 3);
        assert_eq!(factory.runner().peak_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_batch_deadline_reports_unstarted_addresses() {
        let orchestrator = BatchOrchestrator::new(CheckoutConfig {
            batch_deadline: Some(1),
            retry_backoff_ms: 0,
            ..Default::default()
        });
        let factory = FakeFactory::new(FakeScript {
            commit_delays: HashMap::from([(1, Duration::from_millis(1100))]),
            ..Default::default()
        });
        let request = RequestFactory::create(&[1, 2, 3], "TARDE");

        let result = orchestrator.execute_batch(&request, &factory).await.unwrap();

        assert_eq!(result.success, 1);
        assert_eq!(result.failed, 2);
        for outcome in &result.results[1..] {
            assert_eq!(outcome.failure_reason(), Some(FailureReason::Timeout));
            assert_eq!(outcome.attempts, 0);
        }
        assert_eq!(factory.runner().count("clearCart"), 1);
        assert_eq!(factory.runner().disposals(), 1);
    }

    #[tokio::test]
    async fn test_out_of_stock_commit_retried_when_requested() {
        let factory = FakeFactory::new(FakeScript {
            commits: HashMap::from([(5, commit_failure(CommitFailureReason::OutOfStock))]),
            ..Default::default()
        });
        let request = RequestFactory::with_options(
            &[5],
            "TARDE",
            PurchaseOptions {
                retry_out_of_stock: true,
                max_retries: 2,
                ..Default::default()
            },
        );

        let result = orchestrator().execute_batch(&request, &factory).await.unwrap();

        assert_eq!(result.failed, 1);
        assert_eq!(result.results[0].attempts, 3);
        assert_eq!(factory.runner().count("commitOrder"), 3);
    }
}
